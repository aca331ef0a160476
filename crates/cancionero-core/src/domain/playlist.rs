use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::SongId;
use crate::errors::CoreError;

/// Lista de reproducción con nombre.
///
/// Guarda solo referencias (`SongId`) a canciones del catálogo, en el orden
/// en que se añadieron y sin repetidos. Las canciones en sí pertenecen al
/// [`Catalog`](crate::services::Catalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
  name: String,
  song_ids: Vec<SongId>,
  #[serde(default = "Utc::now")]
  created_at: DateTime<Utc>,
}

impl Playlist {
  pub(crate) fn new(name: String) -> Self {
    Self { name, song_ids: Vec::new(), created_at: Utc::now() }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn song_ids(&self) -> &[SongId] {
    &self.song_ids
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  pub fn len(&self) -> usize {
    self.song_ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.song_ids.is_empty()
  }

  pub fn contains(&self, id: SongId) -> bool {
    self.song_ids.contains(&id)
  }

  pub(crate) fn set_name(&mut self, name: String) {
    self.name = name;
  }

  /// Añade al final. Devuelve `false` si ya estaba.
  pub(crate) fn push(&mut self, id: SongId) -> bool {
    if self.contains(id) {
      return false;
    }
    self.song_ids.push(id);
    true
  }

  /// Quita la canción. Devuelve `false` si no estaba.
  pub(crate) fn remove(&mut self, id: SongId) -> bool {
    let before = self.song_ids.len();
    self.song_ids.retain(|s| *s != id);
    self.song_ids.len() != before
  }
}

/// Normaliza un nombre de playlist: sin espacios en los extremos y no vacío.
pub(crate) fn playlist_name(name: &str) -> Result<String, CoreError> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(CoreError::validation("playlist name must not be empty"));
  }
  Ok(trimmed.to_string())
}
