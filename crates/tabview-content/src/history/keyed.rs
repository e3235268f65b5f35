//! Structured key/value encoding (JSON document).

use serde::{Deserialize, Serialize};
use tabview_common::{EntryId, HistoryError, Point};

use super::codec::HistoryCodec;
use super::{HistoryEntry, HistorySnapshot};

const KEYED_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct KeyedHistory {
    version: u32,
    #[serde(rename = "currentIndex")]
    current_index: i64,
    entries: Vec<KeyedEntry>,
}

#[derive(Serialize, Deserialize)]
struct KeyedEntry {
    identifier: String,
    url: String,
    #[serde(default)]
    title: String,
    zoom: u32,
    #[serde(rename = "scrollX", default)]
    scroll_x: i32,
    #[serde(rename = "scrollY", default)]
    scroll_y: i32,
}

/// Key/value history codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyedCodec;

impl HistoryCodec for KeyedCodec {
    fn encode(&self, snapshot: &HistorySnapshot) -> Vec<u8> {
        let document = KeyedHistory {
            version: KEYED_VERSION,
            current_index: snapshot.index.map_or(-1, |index| index as i64),
            entries: snapshot
                .entries
                .iter()
                .map(|entry| KeyedEntry {
                    identifier: entry.id.to_string(),
                    url: entry.url.clone(),
                    title: entry.title.clone(),
                    zoom: entry.zoom,
                    scroll_x: entry.position.x,
                    scroll_y: entry.position.y,
                })
                .collect(),
        };
        serde_json::to_vec(&document).unwrap_or_default()
    }

    fn decode(&self, bytes: &[u8]) -> Result<HistorySnapshot, HistoryError> {
        let document: KeyedHistory = serde_json::from_slice(bytes)
            .map_err(|e| HistoryError::Malformed(e.to_string()))?;

        if document.version != KEYED_VERSION {
            return Err(HistoryError::UnsupportedVersion(document.version));
        }

        let index = match document.current_index {
            -1 => None,
            index if index >= 0 => Some(index as usize),
            index => {
                return Err(HistoryError::Malformed(format!(
                    "negative current index {index}"
                )))
            }
        };

        let entries = document
            .entries
            .into_iter()
            .map(|entry| HistoryEntry {
                id: EntryId::from(entry.identifier),
                url: entry.url,
                title: entry.title,
                zoom: entry.zoom,
                position: Point::new(entry.scroll_x, entry.scroll_y),
            })
            .collect();

        let snapshot = HistorySnapshot::new(entries, index);
        snapshot.validate()?;
        Ok(snapshot)
    }
}
