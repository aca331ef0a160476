pub mod catalog;
pub mod collection;
pub mod library_service;
pub mod playlist_index;

pub use catalog::Catalog;
pub use collection::SongCollection;
pub use library_service::LibraryService;
pub use playlist_index::PlaylistIndex;
