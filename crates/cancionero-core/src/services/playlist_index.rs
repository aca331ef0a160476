use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::domain::playlist::playlist_name;
use crate::domain::{Playlist, Song, SongId};
use crate::errors::CoreError;
use crate::ports::SongRemovalListener;
use crate::services::catalog::Catalog;

/// Conjunto de playlists, indexadas por nombre.
///
/// No posee canciones: cada operación que necesita resolver o comprobar una
/// canción recibe el [`Catalog`] prestado. Los nombres se comparan tras quitar
/// espacios en los extremos y distinguen mayúsculas.
#[derive(Debug, Clone, Default)]
pub struct PlaylistIndex {
  playlists: BTreeMap<String, Playlist>,
}

impl PlaylistIndex {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reconstruye el índice comprobando que todo referencia canciones de `catalog`.
  pub(crate) fn from_parts(playlists: Vec<Playlist>, catalog: &Catalog) -> Result<Self, CoreError> {
    let mut map = BTreeMap::new();
    for mut playlist in playlists {
      let name = playlist_name(playlist.name())?;

      let mut seen = HashSet::new();
      for id in playlist.song_ids() {
        if !catalog.contains(*id) {
          return Err(CoreError::validation(format!("playlist '{name}' references unknown song {id}")));
        }
        if !seen.insert(*id) {
          return Err(CoreError::validation(format!("playlist '{name}' contains song {id} twice")));
        }
      }

      playlist.set_name(name.clone());
      if map.insert(name.clone(), playlist).is_some() {
        return Err(CoreError::validation(format!("duplicate playlist name '{name}'")));
      }
    }
    Ok(Self { playlists: map })
  }

  /// Crea una playlist vacía.
  pub fn create_playlist(&mut self, name: &str) -> Result<&Playlist, CoreError> {
    let name = playlist_name(name)?;
    if self.playlists.contains_key(&name) {
      return Err(CoreError::conflict(format!("playlist '{name}' already exists")));
    }

    debug!(playlist = %name, "playlist created");
    let playlist = self.playlists.entry(name.clone()).or_insert(Playlist::new(name));
    Ok(&*playlist)
  }

  pub fn delete_playlist(&mut self, name: &str) -> Result<Playlist, CoreError> {
    let playlist = self.playlists.remove(name.trim()).ok_or_else(|| playlist_not_found(name))?;
    debug!(playlist = %playlist.name(), "playlist deleted");
    Ok(playlist)
  }

  /// Renombra conservando canciones y fecha de creación.
  pub fn rename_playlist(&mut self, old: &str, new: &str) -> Result<&Playlist, CoreError> {
    let old = old.trim();
    let new = playlist_name(new)?;

    if !self.playlists.contains_key(old) {
      return Err(playlist_not_found(old));
    }
    if new != old && self.playlists.contains_key(&new) {
      return Err(CoreError::conflict(format!("playlist '{new}' already exists")));
    }

    let mut playlist = self.playlists.remove(old).ok_or_else(|| playlist_not_found(old))?;
    playlist.set_name(new.clone());
    debug!(from = %old, to = %new, "playlist renamed");

    let playlist = self.playlists.entry(new).or_insert(playlist);
    Ok(&*playlist)
  }

  /// Añade una canción del catálogo al final de la playlist.
  pub fn add_song(&mut self, name: &str, id: SongId, catalog: &Catalog) -> Result<(), CoreError> {
    let playlist = self.playlists.get_mut(name.trim()).ok_or_else(|| playlist_not_found(name))?;
    if !catalog.contains(id) {
      return Err(CoreError::not_found(format!("song {id}")));
    }
    if !playlist.push(id) {
      return Err(CoreError::conflict(format!("song {id} is already in playlist '{}'", playlist.name())));
    }

    debug!(playlist = %playlist.name(), song_id = %id, "song added to playlist");
    Ok(())
  }

  pub fn remove_song(&mut self, name: &str, id: SongId) -> Result<(), CoreError> {
    let playlist = self.playlists.get_mut(name.trim()).ok_or_else(|| playlist_not_found(name))?;
    if !playlist.remove(id) {
      return Err(CoreError::not_found(format!("song {id} in playlist '{}'", playlist.name())));
    }

    debug!(playlist = %playlist.name(), song_id = %id, "song removed from playlist");
    Ok(())
  }

  /// Canciones de la playlist, resueltas contra `catalog`, en orden de inserción.
  pub fn list_songs<'c>(&self, name: &str, catalog: &'c Catalog) -> Result<Vec<&'c Song>, CoreError> {
    let playlist = self.get(name).ok_or_else(|| playlist_not_found(name))?;
    Ok(playlist.song_ids().iter().filter_map(|id| catalog.get(*id)).collect())
  }

  /// Todas las playlists, por nombre.
  pub fn list_playlists(&self) -> impl Iterator<Item = &Playlist> + '_ {
    self.playlists.values()
  }

  /// Indica si la canción está en la playlist; `NotFound` si la playlist no existe.
  pub fn contains(&self, name: &str, id: SongId) -> Result<bool, CoreError> {
    let playlist = self.get(name).ok_or_else(|| playlist_not_found(name))?;
    Ok(playlist.contains(id))
  }

  pub fn get(&self, name: &str) -> Option<&Playlist> {
    self.playlists.get(name.trim())
  }

  pub fn len(&self) -> usize {
    self.playlists.len()
  }

  pub fn is_empty(&self) -> bool {
    self.playlists.is_empty()
  }
}

impl SongRemovalListener for PlaylistIndex {
  fn on_song_removed(&mut self, id: SongId) {
    for playlist in self.playlists.values_mut() {
      if playlist.remove(id) {
        debug!(playlist = %playlist.name(), song_id = %id, "dropped removed song from playlist");
      }
    }
  }
}

fn playlist_not_found(name: &str) -> CoreError {
  CoreError::not_found(format!("playlist '{}'", name.trim()))
}
