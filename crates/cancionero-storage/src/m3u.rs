use std::io;
use std::path::Path;

use cancionero_core::domain::Song;

/// Genera una lista M3U extendida con las canciones que tienen archivo de audio.
///
/// Cada entrada ocupa dos líneas: `#EXTINF:<segundos>,<artista> - <título>`
/// seguida de la ruta del archivo. Las canciones sin `file_path` se omiten.
pub fn export_m3u<'a, I>(songs: I) -> String
where
  I: IntoIterator<Item = &'a Song>,
{
  let mut m3u = String::from("#EXTM3U\n");
  for song in songs {
    let Some(path) = &song.file_path else {
      continue;
    };
    m3u.push_str(&format!("#EXTINF:{},{} - {}\n", song.duration_seconds, song.artist, song.title));
    m3u.push_str(&format!("{}\n", path.display()));
  }
  m3u
}

/// Escribe la lista en `path` y devuelve cuántas entradas contiene.
pub fn write_m3u<'a, I>(path: &Path, songs: I) -> io::Result<usize>
where
  I: IntoIterator<Item = &'a Song>,
{
  let m3u = export_m3u(songs);
  let entries = m3u.lines().filter(|l| l.starts_with("#EXTINF")).count();
  cancionero_fs::atomic_write_str(path, &m3u)?;
  Ok(entries)
}
