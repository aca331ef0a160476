use cancionero_core::domain::{SongDraft, SortKey};
use cancionero_core::services::LibraryService;
use cancionero_storage::{JsonLibraryStore, export_m3u};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  // Ruta opcional como primer argumento; si no, la de `[storage]` en cancionero.toml.
  let store = match std::env::args().nth(1) {
    Some(path) => JsonLibraryStore::new(path),
    None => JsonLibraryStore::new_from_config().expect("failed to load storage config"),
  };
  println!("Using library file {}", store.path().display());

  let mut service = LibraryService::open(store).expect("failed to open library");
  let collection = service.collection_mut();

  let imagine = collection
    .add(SongDraft::new("Imagine", "John Lennon", 183).genre("Rock").rating(5))
    .expect("failed to add song")
    .id;
  let yesterday = collection
    .add(SongDraft::new("Yesterday", "The Beatles", 125).genre("Rock").file_path("/music/yesterday.mp3"))
    .expect("failed to add song")
    .id;

  if collection.playlists().get("Smoke").is_none() {
    collection.create_playlist("Smoke").expect("failed to create playlist");
  }
  collection.add_song("Smoke", imagine).expect("failed to add to playlist");
  collection.add_song("Smoke", yesterday).expect("failed to add to playlist");

  for song in collection.sort_by(SortKey::Duration, true) {
    let stars = song.rating.map(|r| r.to_string()).unwrap_or_default();
    println!("[{}] {} - {} ({}s) {stars}", song.id, song.title, song.artist, song.duration_seconds);
  }
  println!("{}", export_m3u(collection.list_songs("Smoke").expect("playlist vanished")));

  service.save().expect("failed to save library");
}
