pub mod library_repository;
pub mod removal;

pub use library_repository::{LibraryRepository, LibrarySnapshot, RepoError};
pub use removal::SongRemovalListener;
