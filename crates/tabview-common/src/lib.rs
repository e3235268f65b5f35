pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, HistoryError, NetworkError, TabviewError};
pub use id::{new_id, new_token, EntryId};
pub use types::{FrameId, Point, Rect};
