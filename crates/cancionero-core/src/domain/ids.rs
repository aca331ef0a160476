use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador de una canción dentro del catálogo.
///
/// Es un entero creciente asignado por [`Catalog`](crate::services::Catalog):
/// el primero es `1` y un id eliminado nunca se vuelve a entregar. Por eso el
/// orden de los ids coincide con el orden de alta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(u64);

impl SongId {
  /// Construye un `SongId` a partir de su valor numérico.
  pub fn new(raw: u64) -> Self {
    SongId(raw)
  }

  /// Devuelve el valor numérico interno.
  pub fn get(&self) -> u64 {
    self.0
  }
}

impl From<u64> for SongId {
  fn from(raw: u64) -> Self {
    SongId(raw)
  }
}

impl From<SongId> for u64 {
  fn from(id: SongId) -> Self {
    id.0
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
