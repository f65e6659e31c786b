use crate::{
    domain::{preferences::StoredPreferences, store::BoardSnapshot},
    error::{LanesError, Result},
    storage::{DataLoader, PreferenceStore},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage for the board snapshot and preferences
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const LANES_DIR: &'static str = ".lanes";
    const BOARD_FILE: &'static str = "board.json";
    const PREFERENCES_FILE: &'static str = "preferences.json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::LANES_DIR),
        }
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }

    fn preferences_file(&self) -> PathBuf {
        self.root_path.join(Self::PREFERENCES_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Creates the storage directory and an empty board if none exists
    pub async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        if !self.board_file().exists() {
            self.save_snapshot(&BoardSnapshot::default()).await?;
        }

        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.board_file().exists()
    }

    /// Writes the board snapshot
    pub async fn save_snapshot(&self, snapshot: &BoardSnapshot) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(self.board_file(), json).await?;

        Ok(())
    }
}

#[async_trait]
impl DataLoader for FileStorage {
    async fn load_snapshot(&self) -> Result<BoardSnapshot> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Err(LanesError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&board_file).await?;
        let snapshot: BoardSnapshot = serde_json::from_str(&contents)?;

        tracing::debug!(
            path = %board_file.display(),
            tickets = snapshot.tickets.len(),
            users = snapshot.users.len(),
            "Read board snapshot"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl PreferenceStore for FileStorage {
    async fn load_preferences(&self) -> Result<StoredPreferences> {
        let file_path = self.preferences_file();

        if !file_path.exists() {
            return Ok(StoredPreferences::default());
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn save_preferences(&self, preferences: &StoredPreferences) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(preferences)?;
        fs::write(self.preferences_file(), json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::Ticket;
    use crate::domain::user::User;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_storage_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(!storage.is_initialized().await);

        storage.initialize().await.unwrap();

        assert!(storage.is_initialized().await);
        let snapshot = storage.load_snapshot().await.unwrap();
        assert!(snapshot.tickets.is_empty());
        assert!(snapshot.users.is_empty());
    }

    #[tokio::test]
    async fn test_load_snapshot_uninitialized() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        let result = storage.load_snapshot().await;
        assert!(matches!(result, Err(LanesError::BoardNotInitialized)));
    }

    #[tokio::test]
    async fn test_snapshot_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        let snapshot = BoardSnapshot {
            tickets: vec![Ticket::new("CAM-1".parse().unwrap(), "Test Ticket".to_string())
                .with_priority(3)
                .with_user(Some("usr-1".parse().unwrap()))],
            users: vec![User::new("usr-1".parse().unwrap(), "Anoop".to_string(), true)],
        };
        storage.save_snapshot(&snapshot).await.unwrap();

        let loaded = storage.load_snapshot().await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_load_snapshot_rejects_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        fs::write(storage.board_file(), "{ not json").await.unwrap();

        let result = storage.load_snapshot().await;
        assert!(matches!(result, Err(LanesError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_preferences_default_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        let prefs = storage.load_preferences().await.unwrap();
        assert_eq!(prefs, StoredPreferences::default());
    }

    #[tokio::test]
    async fn test_preferences_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        let prefs = StoredPreferences {
            grouping: "user".to_string(),
            sorting: "title".to_string(),
            updated_at: None,
        };
        storage.save_preferences(&prefs).await.unwrap();

        let loaded = storage.load_preferences().await.unwrap();
        assert_eq!(loaded, prefs);
    }
}
