//! Escenarios de extremo a extremo sobre `SongCollection` y `LibraryService`.

use std::cell::RefCell;

use cancionero_core::CoreError;
use cancionero_core::domain::{SongDraft, SongFilter, SongId, SortKey};
use cancionero_core::ports::{LibraryRepository, LibrarySnapshot, RepoError};
use cancionero_core::services::{LibraryService, SongCollection};

fn beatles_and_lennon() -> (SongCollection, SongId, SongId) {
  let mut collection = SongCollection::new();
  let imagine = collection.add(SongDraft::new("Imagine", "John Lennon", 183).genre("Rock")).unwrap().id;
  let yesterday = collection.add(SongDraft::new("Yesterday", "The Beatles", 125).genre("Rock")).unwrap().id;
  (collection, imagine, yesterday)
}

#[test]
fn filter_and_sort_example() {
  let (collection, imagine, yesterday) = beatles_and_lennon();

  let rock: Vec<SongId> = collection.filter(SongFilter::new().genre("Rock")).map(|s| s.id).collect();
  assert_eq!(rock, vec![imagine, yesterday]);

  let by_duration: Vec<&str> =
    collection.sort_by(SortKey::Duration, true).iter().map(|s| s.title.as_str()).collect();
  assert_eq!(by_duration, vec!["Yesterday", "Imagine"]);
}

#[test]
fn removed_song_disappears_from_favorites() {
  let (mut collection, imagine, _) = beatles_and_lennon();
  collection.create_playlist("Favorites").unwrap();
  collection.add_song("Favorites", imagine).unwrap();

  collection.remove(imagine).unwrap();

  assert!(collection.list_songs("Favorites").unwrap().is_empty());
}

#[test]
fn second_playlist_with_same_name_conflicts() {
  let mut collection = SongCollection::new();
  collection.create_playlist("Favorites").unwrap();

  let err = collection.create_playlist("Favorites").unwrap_err();

  assert!(matches!(err, CoreError::Conflict(_)));
}

#[test]
fn add_then_remove_restores_membership() {
  let (mut collection, imagine, yesterday) = beatles_and_lennon();
  collection.create_playlist("Mix").unwrap();
  collection.add_song("Mix", yesterday).unwrap();
  let before = collection.playlists().get("Mix").unwrap().song_ids().to_vec();

  collection.add_song("Mix", imagine).unwrap();
  collection.remove_song("Mix", imagine).unwrap();

  assert_eq!(collection.playlists().get("Mix").unwrap().song_ids(), before.as_slice());
}

#[test]
fn removing_unknown_song_changes_nothing() {
  let (mut collection, imagine, _) = beatles_and_lennon();
  collection.create_playlist("Mix").unwrap();
  collection.add_song("Mix", imagine).unwrap();
  let before = collection.snapshot();

  assert!(matches!(collection.remove(SongId::new(404)), Err(CoreError::NotFound(_))));

  assert_eq!(collection.snapshot(), before);
}

#[test]
fn cascade_touches_every_playlist() {
  let (mut collection, imagine, yesterday) = beatles_and_lennon();
  for name in ["One", "Two", "Three"] {
    collection.create_playlist(name).unwrap();
    collection.add_song(name, imagine).unwrap();
  }
  collection.add_song("Two", yesterday).unwrap();

  collection.remove(imagine).unwrap();

  for playlist in collection.list_playlists() {
    assert!(!playlist.contains(imagine), "{} still references the song", playlist.name());
  }
  let titles: Vec<String> = collection.list_songs("Two").unwrap().iter().map(|s| s.title.clone()).collect();
  assert_eq!(titles, vec!["Yesterday".to_string()]);
}

#[derive(Default)]
struct InMemoryRepository {
  stored: RefCell<Option<LibrarySnapshot>>,
}

impl LibraryRepository for InMemoryRepository {
  fn load(&self) -> Result<Option<LibrarySnapshot>, RepoError> {
    Ok(self.stored.borrow().clone())
  }

  fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), RepoError> {
    *self.stored.borrow_mut() = Some(snapshot.clone());
    Ok(())
  }
}

struct BrokenRepository;

impl LibraryRepository for BrokenRepository {
  fn load(&self) -> Result<Option<LibrarySnapshot>, RepoError> {
    Err(RepoError::Corrupt("unexpected end of file".into()))
  }

  fn save(&self, _snapshot: &LibrarySnapshot) -> Result<(), RepoError> {
    Err(RepoError::Serde("read-only".into()))
  }
}

#[test]
fn library_service_starts_empty_and_persists() {
  let mut service = LibraryService::open(InMemoryRepository::default()).unwrap();
  assert!(service.collection().catalog().is_empty());

  let id = service.collection_mut().add(SongDraft::new("Imagine", "John Lennon", 183)).unwrap().id;
  service.collection_mut().create_playlist("Favorites").unwrap();
  service.collection_mut().add_song("Favorites", id).unwrap();
  service.save().unwrap();

  let stored = service.repository().stored.borrow().clone().unwrap();
  let reopened = LibraryService::open(InMemoryRepository { stored: RefCell::new(Some(stored)) }).unwrap();

  assert_eq!(reopened.collection().list_songs("Favorites").unwrap()[0].title, "Imagine");
}

#[test]
fn repository_failures_surface_as_core_errors() {
  assert!(matches!(LibraryService::open(BrokenRepository), Err(CoreError::Repository(_))));
}

fn snapshot_from_json(json: &str) -> LibrarySnapshot {
  serde_json::from_str(json).unwrap()
}

#[test]
fn snapshot_with_repeated_playlist_name_is_rejected() {
  let snapshot = snapshot_from_json(r#"{"playlists": [{"name": "A", "song_ids": []}, {"name": " A ", "song_ids": []}]}"#);
  assert!(matches!(SongCollection::from_snapshot(snapshot), Err(CoreError::Validation(_))));
}

#[test]
fn snapshot_with_repeated_membership_is_rejected() {
  let snapshot = snapshot_from_json(
    r#"{"songs": [{"id": 1, "title": "Imagine", "artist": "John Lennon", "duration_seconds": 183}],
        "playlists": [{"name": "Favorites", "song_ids": [1, 1]}]}"#,
  );
  assert!(matches!(SongCollection::from_snapshot(snapshot), Err(CoreError::Validation(_))));
}

#[test]
fn snapshot_with_largest_id_is_rejected() {
  let snapshot = snapshot_from_json(
    r#"{"songs": [{"id": 18446744073709551615, "title": "Imagine", "artist": "John Lennon", "duration_seconds": 183}]}"#,
  );
  let repo = InMemoryRepository { stored: RefCell::new(Some(snapshot)) };

  assert!(matches!(LibraryService::open(repo), Err(CoreError::Validation(_))));
}

#[test]
fn exhausted_id_counter_fails_cleanly() {
  let mut collection = SongCollection::from_snapshot(snapshot_from_json(r#"{"next_id": 18446744073709551615}"#)).unwrap();

  assert!(matches!(collection.add(SongDraft::new("Imagine", "John Lennon", 183)), Err(CoreError::Conflict(_))));
  assert!(collection.catalog().is_empty());
}
