use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::trace;

/// Escribe `contents` en `path` de forma atómica.
///
/// Primero vuelca todo a un archivo hermano `*.tmp`, lo sincroniza a disco y
/// luego lo renombra sobre el destino. Un lector nunca ve un archivo a medias.
/// Crea el directorio padre si todavía no existe.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let tmp_path = path.with_extension("tmp");

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents)?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  trace!(path = %path.display(), bytes = contents.len(), "atomic write completed");
  Ok(())
}

pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  atomic_write(path, contents.as_bytes())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn writes_and_replaces_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("library.json");

    atomic_write_str(&path, "first").unwrap();
    atomic_write_str(&path, "second").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    assert!(!path.with_extension("tmp").exists());
  }

  #[test]
  fn creates_missing_parent_dirs() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("nested").join("deeper").join("cancionero.toml");

    atomic_write(&path, b"[storage]\n").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"[storage]\n");
  }
}
