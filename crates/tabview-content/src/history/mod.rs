//! Navigation history of one tab.
//!
//! `HistoryStore` keeps the ordered entries and the current position. Entries
//! are only mutated through the store's operations; the controller updates
//! the current entry's zoom and scroll position in place.

mod codec;
mod keyed;
mod stream;


pub use codec::{codec_for, transcode, HistoryCodec};
pub use keyed::KeyedCodec;
pub use stream::StreamCodec;

use serde::{Deserialize, Serialize};
use tabview_common::{EntryId, HistoryError, Point};
use tabview_config::schema::HistoryEncoding;
use tracing::{debug, warn};

/// One committed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub url: String,
    pub title: String,
    /// Zoom in percent.
    pub zoom: u32,
    pub position: Point,
}

impl HistoryEntry {
    pub fn new(url: impl Into<String>, zoom: u32) -> Self {
        Self {
            id: EntryId::new(),
            url: url.into(),
            title: String::new(),
            zoom,
            position: Point::default(),
        }
    }
}

/// Detached copy of a history: the persisted layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub entries: Vec<HistoryEntry>,
    /// `None` only when there are no entries.
    pub index: Option<usize>,
}

impl HistorySnapshot {
    pub fn new(entries: Vec<HistoryEntry>, index: Option<usize>) -> Self {
        Self { entries, index }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the index invariant.
    pub fn validate(&self) -> Result<(), HistoryError> {
        match (self.entries.len(), self.index) {
            (0, None) => Ok(()),
            (0, Some(index)) => Err(HistoryError::InvalidIndex { index, len: 0 }),
            (_, None) => Err(HistoryError::Malformed(
                "entries present without a current index".into(),
            )),
            (len, Some(index)) if index >= len => Err(HistoryError::InvalidIndex { index, len }),
            _ => Ok(()),
        }
    }
}

/// Ordered navigation entries plus the current position.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    index: Option<usize>,
    purged: Vec<EntryId>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.and_then(|index| self.entries.get(index))
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut HistoryEntry> {
        self.index.and_then(|index| self.entries.get_mut(index))
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        self.index.is_some_and(|index| index > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.index.is_some_and(|index| index + 1 < self.entries.len())
    }

    /// Append a freshly committed entry, discarding any forward entries.
    pub fn commit(&mut self, entry: HistoryEntry) {
        if let Some(index) = self.index {
            let dropped = self.entries.len() - (index + 1);
            if dropped > 0 {
                debug!(dropped, "history branched, discarding forward entries");
            }
            self.entries.truncate(index + 1);
        }
        self.entries.push(entry);
        self.index = Some(self.entries.len() - 1);
    }

    /// Move the current position. Out-of-range indices leave the store untouched.
    pub fn go_to(&mut self, index: usize) -> Option<&HistoryEntry> {
        if index >= self.entries.len() {
            return None;
        }
        self.index = Some(index);
        self.entries.get(index)
    }

    /// Remove entry `index`, keeping the current position valid.
    ///
    /// When the current entry is removed, the entry that slides into its
    /// place becomes current, else the last remaining entry, else none.
    /// With `purge`, the entry's id is recorded for invalidation of any
    /// persisted copy (see [`HistoryStore::take_purged`]).
    pub fn remove(&mut self, index: usize, purge: bool) -> Option<HistoryEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        let len = self.entries.len();

        self.index = match self.index {
            _ if len == 0 => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) if current == index => Some(index.min(len - 1)),
            other => other,
        };

        if purge {
            self.purged.push(removed.id.clone());
        }
        Some(removed)
    }

    /// Swap in a whole history at once.
    ///
    /// A snapshot that breaks the index invariant is rejected and the store
    /// becomes empty instead.
    pub fn replace(&mut self, snapshot: HistorySnapshot) {
        match snapshot.validate() {
            Ok(()) => {
                self.entries = snapshot.entries;
                self.index = snapshot.index;
            }
            Err(e) => {
                warn!("rejecting inconsistent history: {e}");
                self.entries.clear();
                self.index = None;
            }
        }
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.entries.clone(),
            index: self.index,
        }
    }

    /// Ids of purged entries not yet propagated to persisted storage.
    pub fn purged(&self) -> &[EntryId] {
        &self.purged
    }

    pub fn take_purged(&mut self) -> Vec<EntryId> {
        std::mem::take(&mut self.purged)
    }

    pub fn encode(&self, encoding: HistoryEncoding) -> Vec<u8> {
        codec_for(encoding).encode(&self.snapshot())
    }

    /// Decode persisted bytes, falling back to an empty history on any error.
    pub fn decode(bytes: &[u8], encoding: HistoryEncoding) -> HistorySnapshot {
        match codec_for(encoding).decode(bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(?encoding, len = bytes.len(), "discarding unreadable history: {e}");
                HistorySnapshot::default()
            }
        }
    }
}
