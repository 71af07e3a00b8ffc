use serde::{Deserialize, Serialize};

use super::Beat;
use crate::entities::likes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    pub user_id: i32,
    pub beat_id: i32,
}

impl From<likes::Model> for Like {
    fn from(model: likes::Model) -> Self {
        Self {
            user_id: model.user_id,
            beat_id: model.beat_id,
        }
    }
}

/// Outcome of the like transaction: the new pair plus the beat with its
/// incremented counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikedBeat {
    pub like: Like,
    pub beat: Beat,
}
