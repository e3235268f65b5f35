//! Conversion contract shared by the history encodings.

use tabview_common::HistoryError;
use tabview_config::schema::HistoryEncoding;

use super::keyed::KeyedCodec;
use super::stream::StreamCodec;
use super::HistorySnapshot;

/// Converts a [`HistorySnapshot`] to and from persisted bytes.
///
/// Implementations must be lossless for every field of the snapshot.
pub trait HistoryCodec {
    fn encode(&self, snapshot: &HistorySnapshot) -> Vec<u8>;

    fn decode(&self, bytes: &[u8]) -> Result<HistorySnapshot, HistoryError>;
}

/// Codec selected by the configured encoding.
pub fn codec_for(encoding: HistoryEncoding) -> &'static dyn HistoryCodec {
    match encoding {
        HistoryEncoding::Keyed => &KeyedCodec,
        HistoryEncoding::Stream => &StreamCodec,
    }
}

/// Re-encode persisted history from one encoding into another.
pub fn transcode(
    bytes: &[u8],
    from: HistoryEncoding,
    to: HistoryEncoding,
) -> Result<Vec<u8>, HistoryError> {
    let snapshot = codec_for(from).decode(bytes)?;
    Ok(codec_for(to).encode(&snapshot))
}
