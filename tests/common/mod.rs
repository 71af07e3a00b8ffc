//! Shared fixtures for integration tests.
//!
//! Randomness comes from an explicitly seeded `StdRng` owned by each
//! [`Fixtures`] value, so a failing test replays identically.

#![allow(dead_code)]

use beatstore::config::{PasswordStorage, SecurityConfig};
use beatstore::db::{CatalogStore, Store};
use beatstore::listing::{BeatListingParams, PageParams};
use beatstore::models::{NewBeat, NewUser};
use beatstore::services::{DefaultBeatService, DefaultLikeService, DefaultUserService};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub const MUSICAL_KEYS: [&str; 8] = [
    "C major", "A minor", "F# minor", "Eb major", "G minor", "D major", "Bb minor", "E major",
];

pub const GENRES: [&str; 5] = ["TRAP", "LOFI", "DRILL", "BOOM BAP", "AFROBEAT"];

pub fn temp_db_url(prefix: &str) -> String {
    let db_path =
        std::env::temp_dir().join(format!("beatstore-{prefix}-{}.db", uuid::Uuid::new_v4()));
    format!("sqlite:{}", db_path.display())
}

pub async fn open_store(prefix: &str) -> Store {
    Store::new(&temp_db_url(prefix))
        .await
        .expect("Failed to open test database")
}

/// Plaintext storage keeps password handling out of the hot path in tests.
pub fn plaintext_security() -> SecurityConfig {
    SecurityConfig {
        password_storage: PasswordStorage::Plaintext,
        ..SecurityConfig::default()
    }
}

pub struct Services {
    pub store: Store,
    pub users: DefaultUserService,
    pub beats: DefaultBeatService,
    pub likes: DefaultLikeService,
}

pub async fn services(prefix: &str) -> Services {
    let store = open_store(prefix).await;
    let catalog: Arc<dyn CatalogStore> = Arc::new(store.clone());

    Services {
        users: DefaultUserService::new(catalog.clone(), plaintext_security()),
        beats: DefaultBeatService::new(catalog.clone()),
        likes: DefaultLikeService::new(catalog),
        store,
    }
}

pub struct Fixtures {
    rng: StdRng,
    seq: u32,
}

impl Fixtures {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seq: 0,
        }
    }

    pub fn user(&mut self) -> NewUser {
        self.seq += 1;
        let tag: u32 = self.rng.random_range(1000..10000);
        NewUser {
            username: format!("producer{}_{tag}", self.seq),
            password: format!("pw-{tag}"),
            email: format!("producer{}@example.com", self.seq),
        }
    }

    pub fn beat(&mut self, creator_id: i32) -> NewBeat {
        self.seq += 1;
        let genre = GENRES[self.rng.random_range(0..GENRES.len())];
        let key = MUSICAL_KEYS[self.rng.random_range(0..MUSICAL_KEYS.len())];
        NewBeat {
            creator_id,
            title: format!("beat #{}", self.seq),
            genre: genre.to_string(),
            key: key.to_string(),
            bpm: self.rng.random_range(60..=180),
            tags: format!("{},{}", genre.to_lowercase(), self.rng.random_range(1..100u8)),
        }
    }

    pub fn beat_with_genre(&mut self, creator_id: i32, genre: &str) -> NewBeat {
        NewBeat {
            genre: genre.to_string(),
            ..self.beat(creator_id)
        }
    }

    pub fn beat_with_bpm(&mut self, creator_id: i32, bpm: i16) -> NewBeat {
        NewBeat {
            bpm,
            ..self.beat(creator_id)
        }
    }
}

pub const fn page(page_id: i32, page_size: i32) -> PageParams {
    PageParams { page_id, page_size }
}

pub fn listing(order: &str, page_id: i32, page_size: i32) -> BeatListingParams {
    BeatListingParams {
        page_id,
        page_size,
        order: order.to_string(),
        bpm_min: None,
        bpm_max: None,
        key: None,
        genre: None,
    }
}
