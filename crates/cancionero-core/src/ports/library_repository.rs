use serde::{Deserialize, Serialize};

use crate::domain::{Playlist, Song};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serde(String),

  #[error("corrupt library: {0}")]
  Corrupt(String),
}

/// Foto completa de la biblioteca, tal como se persiste.
///
/// `next_id` se guarda aparte para no reutilizar ids de canciones borradas
/// después de recargar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
  #[serde(default)]
  pub next_id: u64,
  #[serde(default)]
  pub songs: Vec<Song>,
  #[serde(default)]
  pub playlists: Vec<Playlist>,
}

/// Port de persistencia de la biblioteca.
///
/// El formato concreto (JSON, SQLite...) es decisión del adapter.
pub trait LibraryRepository {
  /// `Ok(None)` si todavía no hay nada guardado.
  fn load(&self) -> Result<Option<LibrarySnapshot>, RepoError>;
  fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), RepoError>;
}
