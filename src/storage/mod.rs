use crate::{
    domain::{preferences::StoredPreferences, store::BoardSnapshot},
    error::Result,
};
use async_trait::async_trait;

pub mod file_storage;

/// Supplies the initial tickets and users
#[async_trait]
pub trait DataLoader: Send + Sync {
    /// Loads the full board snapshot
    async fn load_snapshot(&self) -> Result<BoardSnapshot>;
}

/// Persists the board's display preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Loads preferences; a store with nothing saved returns the defaults
    async fn load_preferences(&self) -> Result<StoredPreferences>;

    /// Saves preferences
    async fn save_preferences(&self, preferences: &StoredPreferences) -> Result<()>;
}
