//! Flat binary-stream encoding.
//!
//! Layout (big-endian):
//! `u32 version | i32 current index (-1 = none) | u32 count |
//!  count x (str id | str url | str title | u32 zoom | i32 x | i32 y)`
//! where `str` is a `u32` byte length followed by UTF-8 bytes.

use bytes::{Buf, BufMut, BytesMut};
use tabview_common::{EntryId, HistoryError, Point};

use super::codec::HistoryCodec;
use super::{HistoryEntry, HistorySnapshot};

const STREAM_VERSION: u32 = 1;

/// Binary-stream history codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamCodec;

impl HistoryCodec for StreamCodec {
    fn encode(&self, snapshot: &HistorySnapshot) -> Vec<u8> {
        let mut buf = BytesMut::new();
        buf.put_u32(STREAM_VERSION);
        buf.put_i32(snapshot.index.map_or(-1, |index| index as i32));
        buf.put_u32(snapshot.entries.len() as u32);

        for entry in &snapshot.entries {
            put_str(&mut buf, entry.id.as_str());
            put_str(&mut buf, &entry.url);
            put_str(&mut buf, &entry.title);
            buf.put_u32(entry.zoom);
            buf.put_i32(entry.position.x);
            buf.put_i32(entry.position.y);
        }

        buf.to_vec()
    }

    fn decode(&self, mut bytes: &[u8]) -> Result<HistorySnapshot, HistoryError> {
        let buf = &mut bytes;

        need(buf, 12)?;
        let version = buf.get_u32();
        if version != STREAM_VERSION {
            return Err(HistoryError::UnsupportedVersion(version));
        }
        let index = match buf.get_i32() {
            -1 => None,
            index if index >= 0 => Some(index as usize),
            index => {
                return Err(HistoryError::Malformed(format!(
                    "negative current index {index}"
                )))
            }
        };
        let count = buf.get_u32();

        let mut entries = Vec::new();
        for _ in 0..count {
            let id = get_str(buf)?;
            let url = get_str(buf)?;
            let title = get_str(buf)?;
            need(buf, 12)?;
            let zoom = buf.get_u32();
            let position = Point::new(buf.get_i32(), buf.get_i32());
            entries.push(HistoryEntry {
                id: EntryId::from(id),
                url,
                title,
                zoom,
                position,
            });
        }

        if buf.has_remaining() {
            return Err(HistoryError::Malformed(format!(
                "{} trailing bytes",
                buf.remaining()
            )));
        }

        let snapshot = HistorySnapshot::new(entries, index);
        snapshot.validate()?;
        Ok(snapshot)
    }
}

fn put_str(buf: &mut BytesMut, value: &str) {
    buf.put_u32(value.len() as u32);
    buf.put_slice(value.as_bytes());
}

fn get_str(buf: &mut &[u8]) -> Result<String, HistoryError> {
    need(buf, 4)?;
    let len = buf.get_u32() as usize;
    need(buf, len)?;
    let raw = buf.copy_to_bytes(len);
    String::from_utf8(raw.to_vec()).map_err(|e| HistoryError::Malformed(e.to_string()))
}

fn need(buf: &&[u8], needed: usize) -> Result<(), HistoryError> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(HistoryError::Truncated { needed, remaining });
    }
    Ok(())
}
