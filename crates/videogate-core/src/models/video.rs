use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Number of hex characters in a video identifier (12 bytes).
pub const VIDEO_ID_HEX_LEN: usize = 24;

/// Identifier of a video record, as generated by the lookup store.
///
/// Always held in its canonical lowercase hex form, so two ids that differ only in
/// case compare equal and hit the same store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidVideoId {
    #[error("video id is empty")]
    Empty,

    #[error("video id must be {expected} hex characters, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("video id is not valid hex: {0}")]
    NotHex(String),
}

impl VideoId {
    pub fn parse(raw: &str) -> Result<Self, InvalidVideoId> {
        if raw.is_empty() {
            return Err(InvalidVideoId::Empty);
        }
        if raw.len() != VIDEO_ID_HEX_LEN {
            return Err(InvalidVideoId::Length {
                expected: VIDEO_ID_HEX_LEN,
                actual: raw.len(),
            });
        }
        let bytes = hex::decode(raw).map_err(|e| InvalidVideoId::NotHex(e.to_string()))?;
        Ok(VideoId(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for VideoId {
    type Err = InvalidVideoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoId::parse(s)
    }
}

impl TryFrom<String> for VideoId {
    type Error = InvalidVideoId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VideoId::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Mapping from a video id to the path the storage service understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: VideoId,
    pub video_path: String,
}

impl VideoRecord {
    pub fn new(id: VideoId, video_path: impl Into<String>) -> Self {
        Self {
            id,
            video_path: video_path.into(),
        }
    }
}

/// Body of the "viewed" message sent to the history service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedEvent {
    pub video_path: String,
}

impl ViewedEvent {
    pub fn new(video_path: impl Into<String>) -> Self {
        Self {
            video_path: video_path.into(),
        }
    }
}
