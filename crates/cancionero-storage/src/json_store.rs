use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cancionero_config::ConfigError;
use cancionero_core::ports::{LibraryRepository, LibrarySnapshot, RepoError};
use tracing::debug;

use crate::config::StorageConfig;

/// Implementación de [`LibraryRepository`] sobre un único archivo JSON.
///
/// El documento es la [`LibrarySnapshot`] tal cual (`next_id`, `songs`,
/// `playlists`). Las escrituras son atómicas, y un archivo ausente o vacío se
/// interpreta como "todavía no hay biblioteca".
#[derive(Debug, Clone)]
pub struct JsonLibraryStore {
  path: PathBuf,
  pretty: bool,
}

impl JsonLibraryStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), pretty: true }
  }

  pub fn with_pretty(mut self, pretty: bool) -> Self {
    self.pretty = pretty;
    self
  }

  pub fn from_config(cfg: &StorageConfig) -> Self {
    Self::new(cfg.library_path.clone()).with_pretty(cfg.pretty)
  }

  /// Construye el store con la sección `[storage]` del archivo de configuración global.
  pub fn new_from_config() -> Result<Self, ConfigError> {
    let cfg = StorageConfig::load()?;
    Ok(Self::from_config(&cfg))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl LibraryRepository for JsonLibraryStore {
  fn load(&self) -> Result<Option<LibrarySnapshot>, RepoError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "library file missing");
        return Ok(None);
      }
      Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
      return Ok(None);
    }

    let snapshot: LibrarySnapshot = serde_json::from_str(&content)
      .map_err(|e| RepoError::Corrupt(format!("{}: {e}", self.path.display())))?;

    debug!(path = %self.path.display(), songs = snapshot.songs.len(), "library file loaded");
    Ok(Some(snapshot))
  }

  fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), RepoError> {
    let json = if self.pretty { serde_json::to_string_pretty(snapshot) } else { serde_json::to_string(snapshot) };
    let json = json.map_err(|e| RepoError::Serde(e.to_string()))?;

    cancionero_fs::atomic_write_str(&self.path, &json)?;
    debug!(path = %self.path.display(), bytes = json.len(), "library file written");
    Ok(())
  }
}
