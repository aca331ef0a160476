mod backend;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use paths::{CancioneroPaths, ConfigError};

use once_cell::sync::Lazy;

/// Rutas del proceso: `CANCIONERO_BASE_DIR` si está definida, si no las del sistema.
pub static PATHS: Lazy<CancioneroPaths> =
  Lazy::new(|| CancioneroPaths::new().expect("cannot resolve cancionero directories"));

/// Backend de `cancionero.toml` sobre [`PATHS`].
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
