use crate::domain::grouping::GroupingMode;
use crate::domain::sorting::SortingMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display preferences for the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub grouping: GroupingMode,
    pub sorting: SortingMode,
}

impl Preferences {
    pub fn new(grouping: GroupingMode, sorting: SortingMode) -> Self {
        Self { grouping, sorting }
    }

    /// Resolves persisted string values, falling back to the default for
    /// any value that is not recognised.
    pub fn from_raw(grouping: &str, sorting: &str) -> Self {
        let defaults = Self::default();

        let grouping = grouping.parse().unwrap_or_else(|_| {
            tracing::warn!(
                value = grouping,
                fallback = %defaults.grouping,
                "Unknown grouping preference"
            );
            defaults.grouping
        });
        let sorting = sorting.parse().unwrap_or_else(|_| {
            tracing::warn!(
                value = sorting,
                fallback = %defaults.sorting,
                "Unknown sorting preference"
            );
            defaults.sorting
        });

        Self { grouping, sorting }
    }
}

/// Preferences as persisted by a preference store.
///
/// Values are kept as plain strings so that a file written by another
/// version of the board still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreferences {
    pub grouping: String,
    pub sorting: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredPreferences {
    pub fn resolve(&self) -> Preferences {
        Preferences::from_raw(&self.grouping, &self.sorting)
    }
}

impl From<Preferences> for StoredPreferences {
    fn from(preferences: Preferences) -> Self {
        Self {
            grouping: preferences.grouping.to_string(),
            sorting: preferences.sorting.to_string(),
            updated_at: Some(Utc::now()),
        }
    }
}

impl Default for StoredPreferences {
    fn default() -> Self {
        let defaults = Preferences::default();
        Self {
            grouping: defaults.grouping.to_string(),
            sorting: defaults.sorting.to_string(),
            updated_at: None,
        }
    }
}
