//! Media source descriptors for job submission.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the media for a job comes from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaSource {
    /// A file already on local disk (multipart uploads are spooled here)
    Upload { path: PathBuf },
    /// A YouTube video URL, fetched with yt-dlp
    Youtube { url: String },
    /// A direct download URL (Dropbox share links are normalized)
    DirectUrl { url: String },
}

impl MediaSource {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            MediaSource::Upload { .. } => "upload",
            MediaSource::Youtube { .. } => "youtube",
            MediaSource::DirectUrl { .. } => "direct_url",
        }
    }
}
