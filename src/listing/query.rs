//! Concrete query shapes handed to the store.

use super::{Page, UserOrder};

/// `LIMIT`/`OFFSET` pair derived from a validated [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

impl PageWindow {
    /// `offset = (page_id - 1) * page_size`.
    #[must_use]
    pub fn for_page(page: Page) -> Self {
        let page_size = u64::try_from(page.page_size()).unwrap_or_default();
        let skipped = u64::try_from(page.page_id() - 1).unwrap_or_default();
        Self {
            limit: page_size,
            offset: skipped * page_size,
        }
    }
}

impl From<Page> for PageWindow {
    fn from(page: Page) -> Self {
        Self::for_page(page)
    }
}

/// Predicate applied to the `beats` table. Bpm bounds are inclusive; key and
/// genre are exact, case-sensitive matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeatShape {
    All,
    BpmRange { min: i16, max: i16 },
    Key(String),
    Genre(String),
}

/// One beat listing query: a shape, optionally scoped to a creator, always
/// ordered by `id` ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatQuery {
    pub creator_id: Option<i32>,
    pub shape: BeatShape,
    pub window: PageWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeScope {
    User(i32),
    Beat(i32),
}

/// Like listing query in storage (primary key) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeQuery {
    pub scope: LikeScope,
    pub window: PageWindow,
}

impl LikeQuery {
    #[must_use]
    pub fn by_user(user_id: i32, page: Page) -> Self {
        Self {
            scope: LikeScope::User(user_id),
            window: page.into(),
        }
    }

    #[must_use]
    pub fn by_beat(beat_id: i32, page: Page) -> Self {
        Self {
            scope: LikeScope::Beat(beat_id),
            window: page.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserQuery {
    pub order: UserOrder,
    pub window: PageWindow,
}
