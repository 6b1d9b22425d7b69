use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/musictop/config.toml` or `~/.config/musictop/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUSICTOP__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub remote: RemoteSettings,
    pub board: BoardSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// URL of the song collection (GET/POST here, PATCH/DELETE at `<base_url>/<id>`).
    pub base_url: String,
    /// Per-request timeout in milliseconds. 0 disables the timeout.
    pub timeout_ms: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://mysongsserver.herokuapp.com/songs".to_string(),
            timeout_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// How many entries the ranked list shows.
    pub top_n: usize,
    /// How store search results are ordered.
    pub search_order: SearchOrder,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            top_n: crate::board::DEFAULT_TOP_N,
            search_order: SearchOrder::Ranked,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchOrder {
    /// Same ordering and slice as the main list.
    #[serde(alias = "rank", alias = "top")]
    Ranked,
    /// Whatever order the store returned, unsliced.
    #[serde(alias = "store", alias = "as-returned")]
    Server,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Shown in place of the list when there are no entries.
    pub empty_text: String,
    /// Shown until the first fetch completes.
    pub loading_text: String,

    /// Which entry fields make up a list row, and in what order.
    ///
    /// Example: ["votes", "artist", "name"]
    pub entry_fields: Vec<EntryField>,
    /// Separator used to join `entry_fields`.
    pub entry_separator: String,

    /// How long confirmations stay in the status line (milliseconds).
    pub notice_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Vote for the top songs ~ ".to_string(),
            empty_text: "No Songs found".to_string(),
            loading_text: "Loading songs...".to_string(),
            entry_fields: vec![EntryField::Name, EntryField::Artist, EntryField::Votes],
            entry_separator: " - ".to_string(),
            notice_ms: 3_000,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryField {
    #[serde(alias = "song", alias = "title")]
    Name,
    Artist,
    Album,
    Votes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file. Defaults to `$XDG_STATE_HOME/musictop/musictop.log`.
    pub path: Option<PathBuf>,
    /// `tracing` filter directive; `MUSICTOP_LOG` overrides it.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: None,
            filter: "info".to_string(),
        }
    }
}
