//! Application model types: `App`, its input `Form`s and view modes.
//!
//! The `App` struct owns the ranking view and every piece of interaction
//! state (selection, open form, edit target, outstanding remote operations)
//! that the controller transitions work on.

use std::time::{Duration, Instant};

use crate::board::{Entry, EntryId, RankingView, rank};
use crate::config::{SearchOrder, Settings, UiSettings};
use crate::present::BoardView;

/// Which input surface has the keyboard.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the list.
    #[default]
    Browse,
    /// New-song form.
    Add,
    /// Store search form.
    Search,
    /// Edit form for `App::editing`.
    Edit,
}

/// Whether the initial collection has arrived.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
}

/// A two-field text form.
#[derive(Clone, Debug)]
pub struct Form {
    pub labels: [&'static str; 2],
    pub values: [String; 2],
    pub focus: usize,
}

impl Form {
    pub fn new(labels: [&'static str; 2]) -> Self {
        Self {
            labels,
            values: [String::new(), String::new()],
            focus: 0,
        }
    }

    pub fn set(&mut self, first: &str, second: &str) {
        self.values = [first.to_string(), second.to_string()];
        self.focus = 0;
    }

    pub fn value(&self, i: usize) -> &str {
        self.values.get(i).map(String::as_str).unwrap_or("")
    }

    pub fn push_char(&mut self, c: char) {
        self.values[self.focus].push(c);
    }

    pub fn pop_char(&mut self) {
        self.values[self.focus].pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.values.len();
    }

    pub fn clear(&mut self) {
        for v in &mut self.values {
            v.clear();
        }
        self.focus = 0;
    }
}

/// A short user-visible confirmation.
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

/// The main application model.
pub struct App {
    pub board: RankingView,
    pub selected: usize,
    pub mode: Mode,
    pub load: LoadState,

    /// The last rendered list. Actions are resolved against it, so a key
    /// press always targets what is on screen.
    pub view: BoardView,

    pub add_form: Form,
    pub search_form: Form,
    pub edit_form: Form,
    /// Entry the edit form was opened for.
    pub editing: Option<EntryId>,
    pub pending_edit: bool,

    pub pending_deletes: Vec<EntryId>,
    pub pending_creates: usize,

    /// Store search results replacing the ranked list while present.
    pub search_results: Option<Vec<Entry>>,
    pub notice: Option<Notice>,

    pub(super) top_n: usize,
    pub(super) search_order: SearchOrder,
    pub(super) ui: UiSettings,
    pub(super) notice_ttl: Duration,
}

impl App {
    /// Create an empty `App` waiting for its first fetch.
    pub fn new(settings: &Settings) -> Self {
        Self {
            board: RankingView::default(),
            selected: 0,
            mode: Mode::Browse,
            load: LoadState::Loading,

            view: BoardView::Empty {
                text: settings.ui.loading_text.clone(),
            },

            add_form: Form::new(["Artist", "Song"]),
            search_form: Form::new(["Artist", "Song"]),
            edit_form: Form::new(["Name", "Artist"]),
            editing: None,
            pending_edit: false,

            pending_deletes: Vec::new(),
            pending_creates: 0,

            search_results: None,
            notice: None,

            top_n: settings.board.top_n.max(1),
            search_order: settings.board.search_order,
            ui: settings.ui.clone(),
            notice_ttl: Duration::from_millis(settings.ui.notice_ms),
        }
    }

    /// Entries the list should show, in display order.
    ///
    /// Search results take the place of the ranked top slice while present.
    pub fn visible_entries(&self) -> Vec<&Entry> {
        match &self.search_results {
            Some(results) => match self.search_order {
                SearchOrder::Ranked => rank(results, self.top_n),
                SearchOrder::Server => results.iter().collect(),
            },
            None => self.board.top(self.top_n),
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search_results.is_some()
    }

    /// The form for the current mode, if one is open.
    pub fn active_form(&self) -> Option<&Form> {
        match self.mode {
            Mode::Browse => None,
            Mode::Add => Some(&self.add_form),
            Mode::Search => Some(&self.search_form),
            Mode::Edit => Some(&self.edit_form),
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.mode {
            Mode::Browse => None,
            Mode::Add => Some(&mut self.add_form),
            Mode::Search => Some(&mut self.search_form),
            Mode::Edit => Some(&mut self.edit_form),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending_edit || self.pending_creates > 0 || !self.pending_deletes.is_empty()
    }
}
