//! Routes a validated listing to exactly one query shape.

use thiserror::Error;

use super::query::{BeatQuery, BeatShape, PageWindow, UserQuery};
use super::{BeatListing, BeatOrder, UserListing};

/// The listing claimed an order whose filter it does not carry. Validation
/// rules out this state, so reaching it is an internal fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("listing ordered by {order} is missing its {filter} filter")]
pub struct DispatchError {
    pub order: BeatOrder,
    pub filter: &'static str,
}

/// Selects the beat query shape for `listing`, optionally scoped to
/// `creator_id`.
pub fn beat_query(
    listing: BeatListing,
    creator_id: Option<i32>,
) -> Result<BeatQuery, DispatchError> {
    let missing = |filter| DispatchError {
        order: listing.order,
        filter,
    };

    let shape = match listing.order {
        BeatOrder::Id => BeatShape::All,
        BeatOrder::Bpm => {
            let range = listing.bpm_range.ok_or_else(|| missing("bpm range"))?;
            BeatShape::BpmRange {
                min: range.min,
                max: range.max,
            }
        }
        BeatOrder::Key => BeatShape::Key(listing.key.clone().ok_or_else(|| missing("key"))?),
        BeatOrder::Genre => {
            BeatShape::Genre(listing.genre.clone().ok_or_else(|| missing("genre"))?)
        }
    };

    Ok(BeatQuery {
        creator_id,
        shape,
        window: PageWindow::for_page(listing.page),
    })
}

#[must_use]
pub fn user_query(listing: UserListing) -> UserQuery {
    UserQuery {
        order: listing.order,
        window: PageWindow::for_page(listing.page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{BpmRange, Page};

    fn listing(order: BeatOrder) -> BeatListing {
        BeatListing {
            page: Page::new(2, 5),
            order,
            bpm_range: None,
            key: None,
            genre: None,
        }
    }

    #[test]
    fn test_id_order_lists_everything() {
        let query = beat_query(listing(BeatOrder::Id), None).unwrap();
        assert_eq!(query.shape, BeatShape::All);
        assert_eq!(query.creator_id, None);
        assert_eq!(query.window.offset, 5);
    }

    #[test]
    fn test_each_order_selects_its_shape() {
        let mut bpm = listing(BeatOrder::Bpm);
        bpm.bpm_range = Some(BpmRange { min: 80, max: 95 });
        assert_eq!(
            beat_query(bpm, Some(3)).unwrap().shape,
            BeatShape::BpmRange { min: 80, max: 95 }
        );

        let mut key = listing(BeatOrder::Key);
        key.key = Some("F# minor".to_string());
        assert_eq!(
            beat_query(key, Some(3)).unwrap().shape,
            BeatShape::Key("F# minor".to_string())
        );

        let mut genre = listing(BeatOrder::Genre);
        genre.genre = Some("DRILL".to_string());
        let query = beat_query(genre, Some(3)).unwrap();
        assert_eq!(query.shape, BeatShape::Genre("DRILL".to_string()));
        assert_eq!(query.creator_id, Some(3));
    }

    #[test]
    fn test_missing_filter_is_an_error() {
        let err = beat_query(listing(BeatOrder::Bpm), None).unwrap_err();
        assert_eq!(err.filter, "bpm range");

        let err = beat_query(listing(BeatOrder::Key), None).unwrap_err();
        assert_eq!(err.order, BeatOrder::Key);

        assert!(beat_query(listing(BeatOrder::Genre), Some(1)).is_err());
    }
}
