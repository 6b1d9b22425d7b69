use crate::board::{Entry, EntryId};
use crate::config::UiSettings;

use super::display::line_from_fields;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Vote,
    Delete,
    Edit,
}

/// One affordance on a rendered entry, tagged with its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAction {
    pub kind: ActionKind,
    pub target: EntryId,
}

/// The rendered form of one entry.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: EntryId,
    pub line: String,
    pub name: String,
    pub artist: String,
    pub votes: u64,
    pub actions: [EntryAction; 3],
}

impl Fragment {
    pub fn action(&self, kind: ActionKind) -> &EntryAction {
        match kind {
            ActionKind::Vote => &self.actions[0],
            ActionKind::Delete => &self.actions[1],
            ActionKind::Edit => &self.actions[2],
        }
    }
}

/// What the list region shows.
#[derive(Debug, Clone)]
pub enum BoardView {
    /// Nothing to show: an explicit message rather than a blank region.
    Empty { text: String },
    Items(Vec<Fragment>),
}

impl BoardView {
    pub fn fragments(&self) -> &[Fragment] {
        match self {
            Self::Empty { .. } => &[],
            Self::Items(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.fragments().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments().is_empty()
    }
}

/// Render `entries`, in the order given, into a `BoardView`.
pub fn render(entries: &[&Entry], ui: &UiSettings) -> BoardView {
    if entries.is_empty() {
        return BoardView::Empty {
            text: ui.empty_text.clone(),
        };
    }

    BoardView::Items(
        entries
            .iter()
            .map(|entry| fragment(entry, ui))
            .collect(),
    )
}

fn fragment(entry: &Entry, ui: &UiSettings) -> Fragment {
    let action = |kind| EntryAction {
        kind,
        target: entry.id.clone(),
    };

    Fragment {
        id: entry.id.clone(),
        line: line_from_fields(entry, &ui.entry_fields, &ui.entry_separator),
        name: entry.name.clone(),
        artist: entry.artist.clone(),
        votes: entry.votes(),
        actions: [
            action(ActionKind::Vote),
            action(ActionKind::Delete),
            action(ActionKind::Edit),
        ],
    }
}
