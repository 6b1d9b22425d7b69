use crate::board::Entry;
use crate::config::EntryField;

/// Build the display line for an entry from the configured `fields` and separator.
///
/// Blank text fields are skipped. Falls back to the entry name when no parts
/// were produced.
pub fn line_from_fields(entry: &Entry, fields: &[EntryField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            EntryField::Name => {
                if !entry.name.trim().is_empty() {
                    parts.push(entry.name.trim().to_string());
                }
            }
            EntryField::Artist => {
                if !entry.artist.trim().is_empty() {
                    parts.push(entry.artist.trim().to_string());
                }
            }
            EntryField::Album => {
                if let Some(a) = entry.album.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                    parts.push(a.to_string());
                }
            }
            EntryField::Votes => parts.push(format!("Votes: {}", entry.votes())),
        }
    }

    if parts.is_empty() {
        entry.name.clone()
    } else {
        parts.join(sep)
    }
}
