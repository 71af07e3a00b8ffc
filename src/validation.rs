//! Request validation rules.
//!
//! Every rule is a pure function: nothing here touches storage, and the first
//! failing rule short-circuits with a single [`ValidationError`].

use thiserror::Error;

use crate::constants::{bpm, paging};
use crate::listing::{
    BeatListing, BeatListingParams, BeatOrder, BpmRange, Page, PageParams, UserListing,
    UserListingParams, UserOrder,
};
use crate::models::{BeatUpdate, NewBeat, NewUser, UserUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid page_id {0}: must be at least 1")]
    PageId(i32),

    #[error("invalid page_size {0}: must be between 5 and 10")]
    PageSize(i32),

    #[error("invalid order '{value}': expected one of {expected}")]
    Order {
        value: String,
        expected: &'static str,
    },

    #[error("invalid bpm range supplied")]
    BpmRange,

    #[error("invalid key supplied")]
    Key,

    #[error("invalid genre supplied")]
    Genre,

    #[error("invalid bpm {0}: must be between 20 and 999")]
    Bpm(i16),

    #[error("invalid {field} {value}: must be at least 1")]
    Id { field: &'static str, value: i32 },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

pub fn validate_page(params: PageParams) -> Result<Page, ValidationError> {
    if params.page_id < paging::MIN_PAGE_ID {
        return Err(ValidationError::PageId(params.page_id));
    }
    if !(paging::MIN_PAGE_SIZE..=paging::MAX_PAGE_SIZE).contains(&params.page_size) {
        return Err(ValidationError::PageSize(params.page_size));
    }
    Ok(Page::new(params.page_id, params.page_size))
}

/// Checks pagination, the order token and the filter that order requires.
///
/// Filters not required by the chosen order are dropped from the result.
pub fn validate_beat_listing(params: &BeatListingParams) -> Result<BeatListing, ValidationError> {
    let page = validate_page(PageParams {
        page_id: params.page_id,
        page_size: params.page_size,
    })?;
    let order: BeatOrder = params.order.parse()?;

    let mut listing = BeatListing {
        page,
        order,
        bpm_range: None,
        key: None,
        genre: None,
    };

    match order {
        BeatOrder::Id => {}
        BeatOrder::Bpm => {
            listing.bpm_range = Some(validate_bpm_range(params.bpm_min, params.bpm_max)?);
        }
        BeatOrder::Key => {
            let key = params
                .key
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or(ValidationError::Key)?;
            listing.key = Some(key.to_string());
        }
        BeatOrder::Genre => {
            let genre = params
                .genre
                .as_deref()
                .filter(|g| !g.is_empty())
                .ok_or(ValidationError::Genre)?;
            listing.genre = Some(genre.to_string());
        }
    }

    Ok(listing)
}

/// Both bounds required, `min >= 20`, `max <= 999`, `max > min`.
pub fn validate_bpm_range(min: Option<i16>, max: Option<i16>) -> Result<BpmRange, ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min >= bpm::MIN && max <= bpm::MAX && max > min => {
            Ok(BpmRange { min, max })
        }
        _ => Err(ValidationError::BpmRange),
    }
}

pub fn validate_user_listing(params: &UserListingParams) -> Result<UserListing, ValidationError> {
    let page = validate_page(PageParams {
        page_id: params.page_id,
        page_size: params.page_size,
    })?;
    let order = match params.order.as_deref() {
        None => UserOrder::default(),
        Some(token) => token.parse()?,
    };
    Ok(UserListing { page, order })
}

pub fn validate_id(field: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value < 1 {
        return Err(ValidationError::Id { field, value });
    }
    Ok(value)
}

pub fn validate_like(user_id: i32, beat_id: i32) -> Result<(), ValidationError> {
    validate_id("user_id", user_id)?;
    validate_id("beat_id", beat_id)?;
    Ok(())
}

pub fn validate_bpm(value: i16) -> Result<i16, ValidationError> {
    if !(bpm::MIN..=bpm::MAX).contains(&value) {
        return Err(ValidationError::Bpm(value));
    }
    Ok(value)
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn validate_new_user(input: &NewUser) -> Result<(), ValidationError> {
    require("username", &input.username)?;
    require("password", &input.password)?;
    require("email", &input.email)
}

pub fn validate_user_update(input: &UserUpdate) -> Result<(), ValidationError> {
    validate_id("id", input.id)?;
    require("username", &input.username)?;
    require("password", &input.password)?;
    require("email", &input.email)
}

pub fn validate_new_beat(input: &NewBeat) -> Result<(), ValidationError> {
    validate_id("creator_id", input.creator_id)?;
    require("title", &input.title)?;
    require("genre", &input.genre)?;
    require("key", &input.key)?;
    validate_bpm(input.bpm)?;
    require("tags", &input.tags)
}

pub fn validate_beat_update(input: &BeatUpdate) -> Result<(), ValidationError> {
    validate_id("id", input.id)?;
    require("title", &input.title)?;
    require("genre", &input.genre)?;
    require("key", &input.key)?;
    validate_bpm(input.bpm)?;
    require("tags", &input.tags)
}
