//! State transitions of the `App`.
//!
//! Each user-facing transition mutates the model and hands back the
//! `RemoteCmd` the runtime should send, if any. Completions come back through
//! `apply_remote_event`.

use std::time::Instant;

use tracing::{error, info, warn};

use crate::board::{Entry, EntryId, NewEntry};
use crate::present::{self, ActionKind, BoardView};
use crate::remote::{RecordPatch, RemoteCmd, RemoteEvent, RemoteRecord, SearchFilter};

use super::model::{App, LoadState, Mode, Notice};

impl App {
    /// Re-render the list from the current state and keep the selection in range.
    pub fn rerender(&mut self) {
        let view = match self.load {
            // local adds show even before (or without) a successful load
            LoadState::Loading if !self.is_searching() && self.board.is_empty() => {
                BoardView::Empty {
                    text: self.ui.loading_text.clone(),
                }
            }
            _ => present::render(&self.visible_entries(), &self.ui),
        };
        self.view = view;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.view.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Target of `kind` on the selected row, as rendered.
    pub fn selected_target(&self, kind: ActionKind) -> Option<EntryId> {
        self.view
            .fragments()
            .get(self.selected)
            .map(|f| f.action(kind).target.clone())
    }

    pub fn next(&mut self) {
        if self.selected + 1 < self.view.len() {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.view.len().saturating_sub(1);
    }

    /// Add one vote to the selected entry. Votes never leave this session.
    pub fn vote_selected(&mut self) {
        let Some(id) = self.selected_target(ActionKind::Vote) else {
            return;
        };

        match self.board.get_mut(&id) {
            Some(entry) => {
                entry.vote();
                info!(
                    "voted for {} by {}. Votes: {}",
                    entry.name,
                    entry.artist,
                    entry.votes()
                );
            }
            None => {
                warn!(%id, "vote target is not in the collection");
                return;
            }
        }

        // keep the displayed search copy in step with the collection
        if let Some(copy) = self
            .search_results
            .as_mut()
            .and_then(|results| results.iter_mut().find(|e| e.id == id))
        {
            copy.vote();
        }

        self.rerender();
        self.select_id(&id);
    }

    fn select_id(&mut self, id: &EntryId) {
        if let Some(pos) = self.view.fragments().iter().position(|f| &f.id == id) {
            self.selected = pos;
        }
    }

    pub fn open_add_form(&mut self) {
        self.mode = Mode::Add;
    }

    pub fn open_search_form(&mut self) {
        self.mode = Mode::Search;
    }

    /// Close any form without side effects.
    pub fn cancel(&mut self) {
        if self.mode == Mode::Edit && !self.pending_edit {
            self.editing = None;
            self.edit_form.clear();
        }
        self.mode = Mode::Browse;
    }

    /// Drop search results and show the ranked list again.
    pub fn clear_search(&mut self) {
        if self.search_results.take().is_some() {
            self.selected = 0;
            self.rerender();
        }
    }

    /// Append an entry built from the add form and ask the store to create it.
    pub fn submit_new_song(&mut self) -> Option<RemoteCmd> {
        let artist = self.add_form.value(0).trim().to_string();
        let name = self.add_form.value(1).trim().to_string();
        if name.is_empty() {
            return None;
        }

        let entry = Entry::new(NewEntry {
            name,
            artist,
            ..NewEntry::default()
        });
        let local_id = entry.id.clone();
        let record = RemoteRecord::from_entry(&entry);
        info!(id = %local_id, "adding {} by {}", entry.name, entry.artist);

        self.board.add_entry(entry);
        self.add_form.clear();
        self.mode = Mode::Browse;
        self.search_results = None;
        self.pending_creates += 1;
        self.rerender();
        self.select_id(&local_id);

        Some(RemoteCmd::Create { local_id, record })
    }

    /// Ask the store to delete the selected entry. The local copy goes only
    /// once the store confirms.
    pub fn request_delete_selected(&mut self) -> Option<RemoteCmd> {
        let id = self.selected_target(ActionKind::Delete)?;
        if self.pending_deletes.contains(&id) {
            return None;
        }
        self.pending_deletes.push(id.clone());
        Some(RemoteCmd::Remove { id })
    }

    /// Open the edit form for the selected entry.
    pub fn begin_edit_selected(&mut self) {
        let Some(id) = self.selected_target(ActionKind::Edit) else {
            return;
        };
        if self.pending_edit {
            return;
        }

        let Some(entry) = self.board.get(&id) else {
            warn!(%id, "edit target is not in the collection");
            return;
        };
        self.edit_form.set(&entry.name, &entry.artist);
        self.editing = Some(id);
        self.mode = Mode::Edit;
    }

    /// Send the edit form for the remembered entry.
    pub fn apply_edit(&mut self) -> Option<RemoteCmd> {
        if self.pending_edit {
            return None;
        }
        let id = self.editing.clone()?;
        let patch = RecordPatch {
            name: self.edit_form.value(0).trim().to_string(),
            artist: self.edit_form.value(1).trim().to_string(),
        };
        self.pending_edit = true;
        Some(RemoteCmd::Update { id, patch })
    }

    /// Query the store with the search form values.
    pub fn submit_search(&mut self) -> Option<RemoteCmd> {
        let filter = SearchFilter::new(self.search_form.value(0), self.search_form.value(1));
        self.mode = Mode::Browse;
        Some(RemoteCmd::Search(filter))
    }

    pub fn reload(&mut self) -> RemoteCmd {
        RemoteCmd::FetchAll
    }

    pub fn set_notice(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            text,
            expires_at: now + self.notice_ttl,
        });
    }

    /// Expire the notice once its time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notice = None;
        }
    }

    /// Fold a gateway completion into the state.
    pub fn apply_remote_event(&mut self, event: RemoteEvent) {
        match event {
            RemoteEvent::Fetched(Ok(records)) => {
                info!("loaded {} songs", records.len());
                let entries = records.into_iter().map(RemoteRecord::into_entry).collect();
                self.board.merge_fetched(entries);
                self.load = LoadState::Loaded;
                self.rerender();
            }
            RemoteEvent::Fetched(Err(e)) => {
                error!(error = %e, "failed to load songs");
            }

            RemoteEvent::Searched(Ok(records)) => {
                info!("search returned {} songs", records.len());
                self.search_results =
                    Some(records.into_iter().map(RemoteRecord::into_entry).collect());
                self.selected = 0;
                self.rerender();
            }
            RemoteEvent::Searched(Err(e)) => {
                error!(error = %e, "search failed");
            }

            RemoteEvent::Created { local_id, result } => {
                self.pending_creates = self.pending_creates.saturating_sub(1);
                match result {
                    Ok(record) => self.confirm_created(local_id, record),
                    Err(e) => warn!(id = %local_id, error = %e, "failed to add song"),
                }
            }

            RemoteEvent::Removed { id, result } => {
                self.pending_deletes.retain(|p| p != &id);
                match result {
                    Ok(()) => self.confirm_removed(&id),
                    Err(e) => warn!(%id, error = %e, "failed to delete song"),
                }
            }

            RemoteEvent::Updated { id, result } => {
                self.pending_edit = false;
                match result {
                    Ok(record) => self.confirm_updated(id, record),
                    Err(e) => warn!(%id, error = %e, "failed to update song"),
                }
            }
        }
    }

    fn confirm_created(&mut self, local_id: EntryId, record: RemoteRecord) {
        let (name, artist) = match self.board.get(&local_id) {
            Some(entry) => (
                record.name.clone().unwrap_or_else(|| entry.name.clone()),
                record.artist.clone().unwrap_or_else(|| entry.artist.clone()),
            ),
            None => (
                record.name.clone().unwrap_or_default(),
                record.artist.clone().unwrap_or_default(),
            ),
        };
        info!("{} by {} added to db.", name, artist);
        self.set_notice(format!("{name} by {artist} added to db."), Instant::now());

        if let Some(canonical) = record.id
            && canonical != local_id
            && self.board.reassign_id(&local_id, canonical)
        {
            self.rerender();
        }
    }

    fn confirm_removed(&mut self, id: &EntryId) {
        match self.board.remove(id) {
            Some(entry) => info!("deleted {} by {}", entry.name, entry.artist),
            None => warn!(%id, "deleted song was not in the collection"),
        }
        if let Some(results) = self.search_results.as_mut()
            && let Some(pos) = results.iter().position(|e| &e.id == id)
        {
            results.remove(pos);
        }
        if self.editing.as_ref() == Some(id) {
            self.close_edit();
        }
        self.rerender();
    }

    fn confirm_updated(&mut self, id: EntryId, mut record: RemoteRecord) {
        if record.id.is_none() {
            record.id = Some(id.clone());
        }
        let entry = record.into_entry();
        info!("updated {} by {}", entry.name, entry.artist);

        if let Some(results) = self.search_results.as_mut()
            && let Some(slot) = results.iter_mut().find(|e| e.id == id)
        {
            *slot = entry.clone();
        }
        if !self.board.replace(&id, entry) {
            warn!(%id, "updated song was not in the collection");
        }
        if self.editing.as_ref() == Some(&id) {
            self.close_edit();
        }
        self.rerender();
    }

    fn close_edit(&mut self) {
        self.editing = None;
        self.edit_form.clear();
        if self.mode == Mode::Edit {
            self.mode = Mode::Browse;
        }
    }
}
