pub mod ids;
pub mod playlist;
pub mod query;
pub mod rating;
pub mod song;

pub use ids::SongId;
pub use playlist::Playlist;
pub use query::{SongFilter, SortKey};
pub use rating::Rating;
pub use song::{Song, SongDraft, format_duration};
