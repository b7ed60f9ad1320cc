pub mod quality;
pub mod record;
pub mod release;

pub use quality::{AudioCodec, MediaSource, Resolution, VideoCodec};
pub use record::{ImdbId, MediaKind, MediaRecord, ParseSource, VIDEO_EXTENSIONS};
pub use release::ReleaseInfo;
