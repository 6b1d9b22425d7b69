//! The canonical entry collection and its top-slice ordering.
//!
//! `RankingView::top` sorts a vector of references rather than the live
//! collection, so iteration order of the collection is insertion order.

use std::cmp::Ordering;

use super::model::{Entry, EntryId};

/// Default size of the top slice.
pub const DEFAULT_TOP_N: usize = 10;

/// Ranking comparator: votes descending, then most recently entered first.
///
/// Entries equal on both keys compare `Equal`; callers rely on a stable sort
/// to keep them in collection order.
pub fn rank_order(a: &Entry, b: &Entry) -> Ordering {
    b.votes()
        .cmp(&a.votes())
        .then_with(|| b.entered_at().cmp(&a.entered_at()))
}

/// Return at most `n` entries of `entries` in rank order.
pub fn rank<'a, I>(entries: I, n: usize) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut ranked: Vec<&Entry> = entries.into_iter().collect();
    ranked.sort_by(|a, b| rank_order(a, b));
    ranked.truncate(n);
    ranked
}

/// Owner of every entry known to the session.
#[derive(Debug, Default)]
pub struct RankingView {
    entries: Vec<Entry>,
}

impl RankingView {
    #[cfg(test)]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Append an entry. Ids are not deduplicated.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// The `n` highest-ranked entries.
    pub fn top(&self, n: usize) -> Vec<&Entry> {
        rank(&self.entries, n)
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| &e.id == id)
    }

    /// Remove the first entry with `id`.
    pub fn remove(&mut self, id: &EntryId) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| &e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Replace the first entry with `id` by `entry`, keeping its position.
    /// Returns false when no entry matched.
    pub fn replace(&mut self, id: &EntryId, entry: Entry) -> bool {
        match self.entries.iter_mut().find(|e| &e.id == id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    /// Move the first entry with id `old` over to `new`.
    pub fn reassign_id(&mut self, old: &EntryId, new: EntryId) -> bool {
        match self.get_mut(old) {
            Some(entry) => {
                entry.id = new;
                true
            }
            None => false,
        }
    }

    /// Fold a freshly fetched collection into the board.
    ///
    /// Fetched entries take the place of local ones with the same id but keep
    /// the local vote count (when higher) and entry time. Local entries the
    /// store did not return, such as adds still in flight, stay at the end.
    pub fn merge_fetched(&mut self, fetched: Vec<Entry>) {
        let mut merged: Vec<Entry> = fetched
            .into_iter()
            .map(|mut entry| {
                if let Some(prior) = self.get(&entry.id) {
                    entry.carry_forward(prior);
                }
                entry
            })
            .collect();

        let local_only: Vec<Entry> = self
            .entries
            .drain(..)
            .filter(|local| !merged.iter().any(|e| e.id == local.id))
            .collect();
        merged.extend(local_only);
        self.entries = merged;
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
