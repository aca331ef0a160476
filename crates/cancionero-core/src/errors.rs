use thiserror::Error;

/// Error genérico del núcleo de Cancionero.
///
/// Todas las operaciones fallan antes de tocar el estado: si se devuelve un
/// `CoreError`, el catálogo y las playlists quedan exactamente como estaban.
/// Las capas superiores (CLI, persistencia...) lo traducen a mensajes de usuario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
  /// Entrada mal formada: campo obligatorio vacío, duración negativa, etc.
  #[error("validation error: {0}")]
  Validation(String),

  /// El id o nombre referenciado no existe.
  #[error("not found: {0}")]
  NotFound(String),

  /// Nombre de playlist repetido o canción ya presente en la playlist.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("repository error: {0}")]
  Repository(String),
}

impl CoreError {
  pub(crate) fn validation(msg: impl Into<String>) -> Self {
    CoreError::Validation(msg.into())
  }

  pub(crate) fn not_found(msg: impl Into<String>) -> Self {
    CoreError::NotFound(msg.into())
  }

  pub(crate) fn conflict(msg: impl Into<String>) -> Self {
    CoreError::Conflict(msg.into())
  }
}
