//! Paginated, multi-predicate listing of beats, likes and users.
//!
//! Requests arrive as raw parameter structs, are checked by
//! [`crate::validation`], turned into a typed descriptor ([`BeatListing`],
//! [`Page`], [`UserListing`]) and then dispatched to exactly one query shape
//! ([`query::BeatQuery`], [`query::LikeQuery`], [`query::UserQuery`]) which the
//! store executes.

pub mod dispatch;
pub mod query;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Ordering/filter selector for beat listings. Matching is exact and
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatOrder {
    Id,
    Bpm,
    Key,
    Genre,
}

impl BeatOrder {
    pub const ALL: [Self; 4] = [Self::Id, Self::Bpm, Self::Key, Self::Genre];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Bpm => "BPM",
            Self::Key => "KEY",
            Self::Genre => "GENRE",
        }
    }
}

impl fmt::Display for BeatOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeatOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| ValidationError::Order {
                value: s.to_string(),
                expected: "ID, BPM, KEY, GENRE",
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserOrder {
    #[default]
    Id,
    Username,
}

impl FromStr for UserOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ID" => Ok(Self::Id),
            "USERNAME" => Ok(Self::Username),
            other => Err(ValidationError::Order {
                value: other.to_string(),
                expected: "ID, USERNAME",
            }),
        }
    }
}

/// Pagination parameters as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    pub page_id: i32,
    pub page_size: i32,
}

/// Beat listing parameters as supplied by the caller. The bpm bounds are
/// read from `min`/`max` in query strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BeatListingParams {
    pub page_id: i32,
    pub page_size: i32,
    pub order: String,
    #[serde(default, rename = "min")]
    pub bpm_min: Option<i16>,
    #[serde(default, rename = "max")]
    pub bpm_max: Option<i16>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserListingParams {
    pub page_id: i32,
    pub page_size: i32,
    #[serde(default)]
    pub order: Option<String>,
}

/// A page that passed validation: `page_id >= 1`, `page_size` within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page_id: i32,
    page_size: i32,
}

impl Page {
    pub(crate) const fn new(page_id: i32, page_size: i32) -> Self {
        Self { page_id, page_size }
    }

    #[must_use]
    pub const fn page_id(&self) -> i32 {
        self.page_id
    }

    #[must_use]
    pub const fn page_size(&self) -> i32 {
        self.page_size
    }
}

/// Inclusive bpm bounds with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BpmRange {
    pub min: i16,
    pub max: i16,
}

/// Validated beat listing. Only the filter required by `order` is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatListing {
    pub(crate) page: Page,
    pub(crate) order: BeatOrder,
    pub(crate) bpm_range: Option<BpmRange>,
    pub(crate) key: Option<String>,
    pub(crate) genre: Option<String>,
}

impl BeatListing {
    #[must_use]
    pub const fn order(&self) -> BeatOrder {
        self.order
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserListing {
    pub page: Page,
    pub order: UserOrder,
}
