use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Name of the per-project (or per-user, under $HOME) data directory
pub const DATA_DIR_NAME: &str = ".now-or-never";

/// Failures reading a JSON state file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolved location of the application's state files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Use an explicit directory, else a local .now-or-never up the tree, else ~/.now-or-never
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self { root });
        }

        let current_dir = env::current_dir().context("Could not determine current directory")?;
        if let Some(root) = find_local_dir(&current_dir) {
            return Ok(Self { root });
        }

        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self {
            root: home.join(DATA_DIR_NAME),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if missing
    pub fn ensure(&self) -> Result<&Path> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .with_context(|| format!("Failed to create directory: {}", self.root.display()))?;
        }
        Ok(&self.root)
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.root.join("tasks.json")
    }

    pub fn sessions_file(&self) -> PathBuf {
        self.root.join("sessions.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join("now-or-never.log")
    }
}

/// Find a local data directory by walking up the directory tree
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Create a local data directory inside `dir`
pub fn init_local_dir(dir: &Path) -> Result<PathBuf> {
    let data_dir = dir.join(DATA_DIR_NAME);

    if data_dir.exists() {
        anyhow::bail!("Data directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Pretty-print a value as JSON and write it atomically
pub fn write_json<P: AsRef<Path>, T: serde::Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize state")?;
    atomic_write(path, &json)
}

/// Read and decode a JSON file. `Ok(None)` when the file doesn't exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}
