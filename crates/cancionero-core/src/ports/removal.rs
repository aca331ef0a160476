use crate::domain::SongId;

/// Port por el que el catálogo avisa de que una canción ha dejado de existir.
///
/// [`Catalog::remove`](crate::services::Catalog::remove) lo invoca de forma
/// síncrona, después de borrar la canción y antes de devolver el control, de
/// modo que nadie observa un estado intermedio. Las implementaciones deben ser
/// idempotentes: recibir dos veces el mismo id no es un error.
pub trait SongRemovalListener {
  fn on_song_removed(&mut self, id: SongId);
}

/// Oyente vacío, para usar el catálogo sin playlists.
impl SongRemovalListener for () {
  fn on_song_removed(&mut self, _id: SongId) {}
}
