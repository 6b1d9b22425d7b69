//! Wire records, gateway commands and gateway events.

use serde::{Deserialize, Serialize};

use crate::board::{Entry, EntryId, NewEntry};

use super::error::GatewayResult;

/// One record of the remote collection.
///
/// Every field is optional on the way in; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(
        rename = "initialVotes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_votes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl RemoteRecord {
    /// The record sent when creating `entry`. `initialVotes` carries the
    /// current count; the entry timestamp is never sent.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            name: Some(entry.name.clone()),
            artist: Some(entry.artist.clone()),
            initial_votes: Some(entry.votes()),
            album: entry.album.clone(),
        }
    }

    /// Hydrate a local entry, stamped now.
    pub fn into_entry(self) -> Entry {
        Entry::new(NewEntry {
            name: self.name.unwrap_or_default(),
            artist: self.artist.unwrap_or_default(),
            initial_votes: self.initial_votes,
            album: self.album,
            id: self.id,
        })
    }
}

/// Body of a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPatch {
    pub name: String,
    pub artist: String,
}

/// Store-side filter. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub artist_like: Option<String>,
    pub name_like: Option<String>,
}

impl SearchFilter {
    pub fn new(artist: &str, name: &str) -> Self {
        fn non_blank(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }

        Self {
            artist_like: non_blank(artist),
            name_like: non_blank(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.artist_like.is_none() && self.name_like.is_none()
    }
}

#[derive(Debug)]
pub enum RemoteCmd {
    /// Load the whole collection.
    FetchAll,
    /// Load the collection filtered by the store.
    Search(SearchFilter),
    /// Create a record for the local entry `local_id`.
    Create {
        local_id: EntryId,
        record: RemoteRecord,
    },
    Remove {
        id: EntryId,
    },
    Update {
        id: EntryId,
        patch: RecordPatch,
    },
    /// Stop the worker thread.
    Quit,
}

/// Outcome of a `RemoteCmd`, delivered back to the UI thread.
#[derive(Debug)]
pub enum RemoteEvent {
    Fetched(GatewayResult<Vec<RemoteRecord>>),
    Searched(GatewayResult<Vec<RemoteRecord>>),
    Created {
        local_id: EntryId,
        result: GatewayResult<RemoteRecord>,
    },
    Removed {
        id: EntryId,
        result: GatewayResult<()>,
    },
    Updated {
        id: EntryId,
        result: GatewayResult<RemoteRecord>,
    },
}
