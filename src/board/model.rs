//! Entry model types: `Entry`, `EntryId` and the `NewEntry` constructor input.

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// Locally generated ids must stay exact in a JavaScript-backed store (< 2^53):
// 41 bits of milliseconds followed by a 12-bit sequence.
const MILLIS_BITS: u32 = 41;
const SEQ_BITS: u32 = 12;

static SEQ_SEED: OnceLock<u64> = OnceLock::new();
static SEQ: AtomicU64 = AtomicU64::new(0);

/// Identifier of an entry, as handed out by the remote store or generated locally.
///
/// Stores disagree on the shape (json-server uses numbers, others strings), so
/// both are accepted and written back in the shape they arrived in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Num(u64),
    Text(String),
}

impl EntryId {
    /// Generate a fresh numeric id from the current time and a per-process sequence.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let seed = *SEQ_SEED.get_or_init(rand::random::<u64>);
        let seq = seed.wrapping_add(SEQ.fetch_add(1, Ordering::Relaxed));

        let millis = millis & ((1u64 << MILLIS_BITS) - 1);
        let seq = seq & ((1u64 << SEQ_BITS) - 1);
        Self::Num((millis << SEQ_BITS) | seq)
    }
}

impl PartialEq for EntryId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Num(a), Self::Num(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Num(n), Self::Text(s)) | (Self::Text(s), Self::Num(n)) => {
                *s == n.to_string()
            }
        }
    }
}

impl Eq for EntryId {}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EntryId {
    fn from(n: u64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Input for `Entry::new`. Every field except the two titles is optional.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub name: String,
    pub artist: String,
    pub initial_votes: Option<u64>,
    pub album: Option<String>,
    pub id: Option<EntryId>,
}

/// One votable song held in memory.
///
/// The vote counter and entry timestamp are only readable from outside; the
/// counter changes exclusively through `vote()`.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    votes: u64,
    entered_at: SystemTime,
}

impl Entry {
    /// Create an entry stamped with the current time.
    pub fn new(new: NewEntry) -> Self {
        Self::with_entered_at(new, SystemTime::now())
    }

    /// Create an entry with an explicit entry timestamp.
    pub fn with_entered_at(new: NewEntry, at: SystemTime) -> Self {
        Self {
            id: new.id.unwrap_or_else(EntryId::generate),
            name: new.name,
            artist: new.artist,
            album: new.album,
            votes: new.initial_votes.unwrap_or(0),
            entered_at: at,
        }
    }

    /// Cast one vote.
    pub fn vote(&mut self) {
        self.votes = self.votes.saturating_add(1);
    }

    /// Keep session state from an earlier copy of the same entry: the higher
    /// vote count and the original entry time.
    pub fn carry_forward(&mut self, prior: &Entry) {
        self.votes = self.votes.max(prior.votes);
        self.entered_at = prior.entered_at;
    }

    pub fn votes(&self) -> u64 {
        self.votes
    }

    pub fn entered_at(&self) -> SystemTime {
        self.entered_at
    }
}
