use cancionero_config::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sección `[storage]` de `cancionero.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
  /// Archivo JSON donde se guarda la biblioteca.
  pub library_path: PathBuf,

  /// Escribir el JSON indentado (legible a mano) o compacto.
  #[serde(default = "default_pretty")]
  pub pretty: bool,
}

fn default_pretty() -> bool {
  true
}

impl Default for StorageConfig {
  fn default() -> Self {
    let library_path = PATHS.data_dir.join("library.json");
    StorageConfig { library_path, pretty: default_pretty() }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("storage")?;
    CONFIG_BACKEND.save_section("storage", &cfg)?;
    Ok(cfg)
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section("storage")
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("storage", self)
  }
}
