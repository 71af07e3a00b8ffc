use serde::{Deserialize, Serialize};

use crate::entities::beats;

/// Storage locator written for every new beat until uploads exist.
pub const PLACEHOLDER_S3_KEY: &str = "not implemented";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    pub id: i32,
    pub creator_id: i32,
    pub title: String,
    pub genre: String,
    pub key: String,
    pub bpm: i16,
    pub tags: String,
    pub s3_key: String,
    pub likes_count: i64,
    pub created_at: String,
}

impl Beat {
    /// Splits the comma-separated `tags` column, dropping blanks.
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl From<beats::Model> for Beat {
    fn from(model: beats::Model) -> Self {
        Self {
            id: model.id,
            creator_id: model.creator_id,
            title: model.title,
            genre: model.genre,
            key: model.key,
            bpm: model.bpm,
            tags: model.tags,
            s3_key: model.s3_key,
            likes_count: model.likes_count,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBeat {
    pub creator_id: i32,
    pub title: String,
    pub genre: String,
    pub key: String,
    pub bpm: i16,
    pub tags: String,
}

/// Full replacement of a beat's user-editable columns. `creator_id`,
/// `likes_count` and `s3_key` are never part of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatUpdate {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub key: String,
    pub bpm: i16,
    pub tags: String,
}
