//! Board service: the engine behind a single-writer lock.
//!
//! All mutation (loading, mode changes, moves) goes through the write half of
//! one `RwLock`, so a move always sees and replaces a whole store.

use crate::domain::board::{Column, ProjectionCache};
use crate::domain::grouping::GroupingMode;
use crate::domain::moves::{self, DragEvent, MoveOutcome, MoveRequest};
use crate::domain::preferences::{Preferences, StoredPreferences};
use crate::domain::sorting::SortingMode;
use crate::domain::store::TicketStore;
use crate::error::Result;
use crate::storage::{DataLoader, PreferenceStore};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct BoardState {
    store: TicketStore,
    preferences: Preferences,
    cache: ProjectionCache,
}

impl BoardState {
    fn commit(&mut self, outcome: &MoveOutcome) {
        if let MoveOutcome::Applied { store, .. } = outcome {
            self.store = store.clone();
        }
    }
}

/// Serialized access to the board engine
#[derive(Debug, Default)]
pub struct BoardService {
    state: RwLock<BoardState>,
}

impl BoardService {
    /// Creates a service with an empty store
    pub fn new(preferences: Preferences) -> Self {
        Self::with_store(TicketStore::empty(), preferences)
    }

    pub fn with_store(store: TicketStore, preferences: Preferences) -> Self {
        Self {
            state: RwLock::new(BoardState {
                store,
                preferences,
                cache: ProjectionCache::new(),
            }),
        }
    }

    /// Loads the initial snapshot.
    ///
    /// On failure the store is left empty and the error is returned.
    pub async fn load(&self, loader: &dyn DataLoader) -> Result<()> {
        let loaded = loader.load_snapshot().await;
        let mut state = self.state.write().await;

        match loaded {
            Ok(snapshot) => {
                state.store = TicketStore::from_snapshot(snapshot);
                tracing::info!(
                    tickets = state.store.tickets().len(),
                    users = state.store.users().len(),
                    "Board loaded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load board data");
                state.store = TicketStore::empty();
                Err(e)
            }
        }
    }

    /// Reads persisted preferences, falling back to defaults for unknown values
    pub async fn load_preferences(&self, store: &dyn PreferenceStore) -> Result<Preferences> {
        let stored = store.load_preferences().await?;
        let preferences = stored.resolve();

        self.state.write().await.preferences = preferences;
        tracing::info!(
            grouping = %preferences.grouping,
            sorting = %preferences.sorting,
            "Preferences loaded"
        );
        Ok(preferences)
    }

    pub async fn save_preferences(&self, store: &dyn PreferenceStore) -> Result<()> {
        let preferences = self.preferences().await;
        store
            .save_preferences(&StoredPreferences::from(preferences))
            .await
    }

    pub async fn preferences(&self) -> Preferences {
        self.state.read().await.preferences
    }

    /// Switches the grouping mode. An unknown mode is an error and the
    /// current mode stays in effect.
    pub async fn set_grouping(&self, raw: &str) -> Result<GroupingMode> {
        let grouping: GroupingMode = raw.parse()?;
        self.state.write().await.preferences.grouping = grouping;
        tracing::info!(grouping = %grouping, "Grouping changed");
        Ok(grouping)
    }

    /// Switches the sorting mode. An unknown mode is an error and the
    /// current mode stays in effect.
    pub async fn set_sorting(&self, raw: &str) -> Result<SortingMode> {
        let sorting: SortingMode = raw.parse()?;
        self.state.write().await.preferences.sorting = sorting;
        tracing::info!(sorting = %sorting, "Sorting changed");
        Ok(sorting)
    }

    /// Current columns for the active preferences
    pub async fn columns(&self) -> Result<Vec<Column>> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let preferences = state.preferences;

        state
            .cache
            .project(
                state.store.tickets(),
                state.store.users(),
                preferences.grouping,
                preferences.sorting,
            )
            .map(|columns| columns.to_vec())
    }

    /// Applies a move under the active grouping mode
    pub async fn apply_move(&self, request: &MoveRequest) -> MoveOutcome {
        let mut state = self.state.write().await;
        let outcome = moves::apply_move(&state.store, request, state.preferences.grouping);
        state.commit(&outcome);
        outcome
    }

    /// Applies a drag-end event under the active grouping mode
    pub async fn apply_drag(&self, event: DragEvent) -> MoveOutcome {
        let mut state = self.state.write().await;
        let outcome = moves::apply_drag(&state.store, event, state.preferences.grouping);
        state.commit(&outcome);
        outcome
    }

    /// Copy of the current store
    pub async fn snapshot(&self) -> TicketStore {
        self.state.read().await.store.clone()
    }
}
