use tracing::info;

use crate::errors::CoreError;
use crate::ports::{LibraryRepository, RepoError};
use crate::services::collection::SongCollection;

/// Colección respaldada por un repositorio.
///
/// La colección vive en memoria; el repositorio solo se toca al abrir y al
/// llamar a [`LibraryService::save`].
pub struct LibraryService<R>
where
  R: LibraryRepository,
{
  repo: R,
  collection: SongCollection,
}

impl<R> LibraryService<R>
where
  R: LibraryRepository,
{
  /// Carga la biblioteca guardada o empieza con una vacía si no hay nada.
  pub fn open(repo: R) -> Result<Self, CoreError> {
    let collection = match repo.load().map_err(repo_error)? {
      Some(snapshot) => SongCollection::from_snapshot(snapshot)?,
      None => SongCollection::new(),
    };

    info!(
      songs = collection.catalog().len(),
      playlists = collection.playlists().len(),
      "library opened"
    );

    Ok(Self { repo, collection })
  }

  pub fn save(&self) -> Result<(), CoreError> {
    let snapshot = self.collection.snapshot();
    self.repo.save(&snapshot).map_err(repo_error)?;

    info!(songs = snapshot.songs.len(), playlists = snapshot.playlists.len(), "library saved");
    Ok(())
  }

  pub fn collection(&self) -> &SongCollection {
    &self.collection
  }

  pub fn collection_mut(&mut self) -> &mut SongCollection {
    &mut self.collection
  }

  pub fn repository(&self) -> &R {
    &self.repo
  }
}

fn repo_error(err: RepoError) -> CoreError {
  CoreError::Repository(err.to_string())
}
