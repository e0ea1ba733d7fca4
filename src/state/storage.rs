// App data directory resolution
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to get app data directory")]
    NoAppDataDir,
}

pub type StorageResult<T> = Result<T, StorageError>;

const APP_DIR_NAME: &str = "com.plasmalink.app";

/// Get the app data directory for PlasmaLink, creating it if needed
pub fn get_app_data_dir() -> StorageResult<PathBuf> {
    let data_dir = dirs::data_dir().ok_or(StorageError::NoAppDataDir)?;
    app_dir_under(data_dir)
}

fn app_dir_under(base: PathBuf) -> StorageResult<PathBuf> {
    let app_dir = base.join(APP_DIR_NAME);
    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_dir_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let dir = app_dir_under(temp_dir.path().to_path_buf()).unwrap();

        assert!(dir.is_dir());
        assert!(dir.ends_with(APP_DIR_NAME));
    }
}
