use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::{Playlist, Song, SongDraft, SongFilter, SongId, SortKey};
use crate::errors::CoreError;
use crate::ports::LibrarySnapshot;
use crate::services::catalog::Catalog;
use crate::services::playlist_index::PlaylistIndex;

/// La colección completa: catálogo de canciones y sus playlists.
///
/// Es el único punto desde el que se mutan ambas partes, de forma que toda
/// playlist referencia siempre canciones existentes. Borrar una canción la
/// quita también de todas las playlists dentro de la misma llamada.
#[derive(Debug, Clone, Default)]
pub struct SongCollection {
  catalog: Catalog,
  playlists: PlaylistIndex,
}

impl SongCollection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reconstruye la colección desde una foto persistida, validándola entera.
  pub fn from_snapshot(snapshot: LibrarySnapshot) -> Result<Self, CoreError> {
    let catalog = Catalog::from_parts(snapshot.songs, snapshot.next_id)?;
    let playlists = PlaylistIndex::from_parts(snapshot.playlists, &catalog)?;
    Ok(Self { catalog, playlists })
  }

  pub fn snapshot(&self) -> LibrarySnapshot {
    LibrarySnapshot {
      next_id: self.catalog.next_id(),
      songs: self.catalog.iter().cloned().collect(),
      playlists: self.playlists.list_playlists().cloned().collect(),
    }
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn playlists(&self) -> &PlaylistIndex {
    &self.playlists
  }

  // -------- canciones --------

  pub fn add(&mut self, draft: SongDraft) -> Result<&Song, CoreError> {
    self.catalog.add(draft)
  }

  pub fn update(&mut self, id: SongId, draft: SongDraft) -> Result<&Song, CoreError> {
    self.catalog.update(id, draft)
  }

  pub fn rename(&mut self, id: SongId, title: &str) -> Result<&Song, CoreError> {
    self.catalog.rename(id, title)
  }

  /// Borra la canción del catálogo y de todas las playlists.
  pub fn remove(&mut self, id: SongId) -> Result<Song, CoreError> {
    self.catalog.remove(id, &mut self.playlists)
  }

  pub fn get(&self, id: SongId) -> Option<&Song> {
    self.catalog.get(id)
  }

  pub fn search(&self, query: &str) -> impl Iterator<Item = &Song> + '_ {
    self.catalog.search(query)
  }

  pub fn smart_search(&self, keyword: &str) -> Vec<(&Song, f64)> {
    self.catalog.smart_search(keyword)
  }

  pub fn filter(&self, filter: SongFilter) -> impl Iterator<Item = &Song> + '_ {
    self.catalog.filter(filter)
  }

  pub fn sort_by(&self, key: SortKey, ascending: bool) -> Vec<&Song> {
    self.catalog.sort_by(key, ascending)
  }

  pub fn genre_counts(&self) -> BTreeMap<String, usize> {
    self.catalog.genre_counts()
  }

  pub fn total_duration(&self) -> u64 {
    self.catalog.total_duration()
  }

  // -------- playlists --------

  pub fn create_playlist(&mut self, name: &str) -> Result<&Playlist, CoreError> {
    self.playlists.create_playlist(name)
  }

  pub fn delete_playlist(&mut self, name: &str) -> Result<Playlist, CoreError> {
    self.playlists.delete_playlist(name)
  }

  pub fn rename_playlist(&mut self, old: &str, new: &str) -> Result<&Playlist, CoreError> {
    self.playlists.rename_playlist(old, new)
  }

  pub fn add_song(&mut self, playlist: &str, id: SongId) -> Result<(), CoreError> {
    self.playlists.add_song(playlist, id, &self.catalog)
  }

  pub fn remove_song(&mut self, playlist: &str, id: SongId) -> Result<(), CoreError> {
    self.playlists.remove_song(playlist, id)
  }

  pub fn list_songs(&self, playlist: &str) -> Result<Vec<&Song>, CoreError> {
    self.playlists.list_songs(playlist, &self.catalog)
  }

  pub fn contains(&self, playlist: &str, id: SongId) -> Result<bool, CoreError> {
    self.playlists.contains(playlist, id)
  }

  pub fn list_playlists(&self) -> impl Iterator<Item = &Playlist> + '_ {
    self.playlists.list_playlists()
  }

  /// Portada de la playlist: la de la primera canción que tenga una.
  pub fn playlist_cover(&self, playlist: &str) -> Result<Option<&Path>, CoreError> {
    let songs = self.list_songs(playlist)?;
    Ok(songs.into_iter().find_map(|song| song.cover_path.as_deref()))
  }

  /// Duración total de una playlist en segundos.
  pub fn playlist_duration(&self, playlist: &str) -> Result<u64, CoreError> {
    let songs = self.list_songs(playlist)?;
    Ok(crate::domain::song::total_duration(songs))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  #[test]
  fn removing_a_song_cascades_to_playlists() {
    let mut collection = SongCollection::new();
    let imagine = collection.add(SongDraft::new("Imagine", "John Lennon", 183).genre("Rock")).unwrap().id;
    collection.create_playlist("Favorites").unwrap();
    collection.add_song("Favorites", imagine).unwrap();

    assert_eq!(collection.contains("Favorites", imagine), Ok(true));
    collection.remove(imagine).unwrap();

    assert!(collection.list_songs("Favorites").unwrap().is_empty());
    assert_eq!(collection.contains("Favorites", imagine), Ok(false));
    assert!(matches!(collection.add_song("Favorites", imagine), Err(CoreError::NotFound(_))));
  }

  #[test]
  fn playlist_cover_uses_first_song_with_cover() {
    let mut collection = SongCollection::new();
    let bare = collection.add(SongDraft::new("Bare", "A", 10)).unwrap().id;
    let covered = collection.add(SongDraft::new("Covered", "B", 20).cover_path("/covers/b.png")).unwrap().id;
    collection.create_playlist("Mix").unwrap();

    assert_eq!(collection.playlist_cover("Mix").unwrap(), None);

    collection.add_song("Mix", bare).unwrap();
    collection.add_song("Mix", covered).unwrap();

    assert_eq!(collection.playlist_cover("Mix").unwrap(), Some(PathBuf::from("/covers/b.png").as_path()));
    assert_eq!(collection.playlist_duration("Mix").unwrap(), 30);
  }

  #[test]
  fn snapshot_round_trip_preserves_next_id() {
    let mut collection = SongCollection::new();
    let a = collection.add(SongDraft::new("A", "X", 1)).unwrap().id;
    let b = collection.add(SongDraft::new("B", "Y", 2)).unwrap().id;
    collection.create_playlist("P").unwrap();
    collection.add_song("P", a).unwrap();
    collection.remove(b).unwrap();

    let mut restored = SongCollection::from_snapshot(collection.snapshot()).unwrap();

    assert_eq!(restored.list_songs("P").unwrap().len(), 1);
    assert_eq!(restored.add(SongDraft::new("C", "Z", 3)).unwrap().id, SongId::new(3));
  }

  #[test]
  fn snapshot_with_dangling_membership_is_rejected() {
    let mut collection = SongCollection::new();
    let a = collection.add(SongDraft::new("A", "X", 1)).unwrap().id;
    collection.create_playlist("P").unwrap();
    collection.add_song("P", a).unwrap();

    let mut snapshot = collection.snapshot();
    snapshot.songs.clear();

    assert!(matches!(SongCollection::from_snapshot(snapshot), Err(CoreError::Validation(_))));
  }
}
