use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::song::total_duration;
use crate::domain::{Song, SongDraft, SongFilter, SongId, SortKey};
use crate::errors::CoreError;
use crate::ports::SongRemovalListener;

/// Género bajo el que se cuentan las canciones sin género en [`Catalog::genre_counts`].
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Almacén autoritativo de canciones.
///
/// Las canciones se guardan indexadas por id, así que cualquier recorrido sin
/// orden explícito sale en orden de alta.
#[derive(Debug, Clone)]
pub struct Catalog {
  songs: BTreeMap<SongId, Song>,
  next_id: u64,
}

impl Default for Catalog {
  fn default() -> Self {
    Self::new()
  }
}

impl Catalog {
  pub fn new() -> Self {
    Self { songs: BTreeMap::new(), next_id: 1 }
  }

  /// Reconstruye un catálogo a partir de canciones ya existentes.
  ///
  /// Falla con `Validation` si hay ids repetidos o alguna canción no supera la
  /// validación. `next_id` nunca queda por debajo del mayor id más uno.
  pub(crate) fn from_parts(songs: Vec<Song>, next_id: u64) -> Result<Self, CoreError> {
    let mut map = BTreeMap::new();
    for song in songs {
      let song = song.normalized()?;
      let id = song.id;
      if map.insert(id, song).is_some() {
        return Err(CoreError::validation(format!("duplicate song id {id}")));
      }
    }

    let after_max = match map.keys().next_back() {
      Some(id) => id.get().checked_add(1).ok_or_else(|| CoreError::validation(format!("song id {id} is out of range")))?,
      None => 1,
    };
    Ok(Self { songs: map, next_id: next_id.max(after_max) })
  }

  /// Da de alta una canción nueva con un id fresco.
  pub fn add(&mut self, draft: SongDraft) -> Result<&Song, CoreError> {
    self.add_at(draft, Utc::now())
  }

  /// Igual que [`Catalog::add`] pero fijando la fecha de alta (importaciones).
  pub fn add_at(&mut self, draft: SongDraft, date_added: DateTime<Utc>) -> Result<&Song, CoreError> {
    let fields = draft.validate()?;

    let id = SongId::new(self.next_id);
    let next_id = self.next_id.checked_add(1).ok_or_else(|| CoreError::conflict("no song ids left"))?;

    let song = match self.songs.entry(id) {
      Entry::Vacant(slot) => slot.insert(Song::new(id, fields, date_added)),
      Entry::Occupied(_) => return Err(CoreError::conflict(format!("song id {id} is already taken"))),
    };
    self.next_id = next_id;
    debug!(song_id = %id, title = %song.title, artist = %song.artist, "song added");
    Ok(&*song)
  }

  /// Reemplaza los campos editables de una canción, conservando id y fecha de alta.
  pub fn update(&mut self, id: SongId, draft: SongDraft) -> Result<&Song, CoreError> {
    if !self.songs.contains_key(&id) {
      return Err(song_not_found(id));
    }
    let fields = draft.validate()?;

    let song = self.songs.get_mut(&id).ok_or_else(|| song_not_found(id))?;
    song.apply(fields);
    debug!(song_id = %id, "song updated");
    Ok(&*song)
  }

  /// Cambia solo el título.
  pub fn rename(&mut self, id: SongId, title: &str) -> Result<&Song, CoreError> {
    let current = self.get(id).ok_or_else(|| song_not_found(id))?;
    let draft = SongDraft {
      title: title.to_string(),
      artist: current.artist.clone(),
      genre: current.genre.clone(),
      duration_seconds: i64::from(current.duration_seconds),
      rating: current.rating.map(u8::from),
      file_path: current.file_path.clone(),
      cover_path: current.cover_path.clone(),
    };
    self.update(id, draft)
  }

  /// Elimina la canción y notifica a `listener` antes de devolver.
  pub fn remove(&mut self, id: SongId, listener: &mut dyn SongRemovalListener) -> Result<Song, CoreError> {
    let song = self.songs.remove(&id).ok_or_else(|| song_not_found(id))?;
    listener.on_song_removed(id);
    debug!(song_id = %id, "song removed");
    Ok(song)
  }

  pub fn get(&self, id: SongId) -> Option<&Song> {
    self.songs.get(&id)
  }

  pub fn contains(&self, id: SongId) -> bool {
    self.songs.contains_key(&id)
  }

  pub fn len(&self) -> usize {
    self.songs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.songs.is_empty()
  }

  /// Próximo id que se asignará.
  pub fn next_id(&self) -> u64 {
    self.next_id
  }

  /// Todas las canciones en orden de id.
  pub fn iter(&self) -> impl Iterator<Item = &Song> + '_ {
    self.songs.values()
  }

  /// Canciones cuyo título o artista contienen `query`, sin distinguir
  /// mayúsculas. Una consulta vacía devuelve todo.
  ///
  /// El iterador es perezoso y se evalúa contra el estado actual en cada
  /// llamada.
  pub fn search(&self, query: &str) -> impl Iterator<Item = &Song> + '_ {
    let needle = query.to_lowercase();
    self.songs.values().filter(move |song| song.matches_lowercase(&needle))
  }

  /// Canciones que cumplen todos los criterios fijados en `filter`.
  pub fn filter(&self, filter: SongFilter) -> impl Iterator<Item = &Song> + '_ {
    self.songs.values().filter(move |song| filter.matches(song))
  }

  /// Todas las canciones ordenadas por `key`; los empates se resuelven por id
  /// ascendente en ambos sentidos.
  pub fn sort_by(&self, key: SortKey, ascending: bool) -> Vec<&Song> {
    let mut songs: Vec<&Song> = self.songs.values().collect();
    songs.sort_by(|a, b| {
      let by_key = key.compare(a, b);
      let by_key = if ascending { by_key } else { by_key.reverse() };
      by_key.then(a.id.cmp(&b.id))
    });
    songs
  }

  /// Búsqueda por parecido de palabras (ver [`Song::similarity_score`]).
  ///
  /// Solo devuelve canciones con puntuación mayor que cero, de más a menos
  /// parecida y desempatando por id.
  pub fn smart_search(&self, keyword: &str) -> Vec<(&Song, f64)> {
    let mut scored: Vec<(&Song, f64)> = self
      .songs
      .values()
      .map(|song| (song, song.similarity_score(keyword)))
      .filter(|(_, score)| *score > 0.0)
      .collect();

    scored.sort_by(|(a, sa), (b, sb)| sb.total_cmp(sa).then(a.id.cmp(&b.id)));
    scored
  }

  /// Número de canciones por género, ordenado por nombre de género.
  pub fn genre_counts(&self) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for song in self.songs.values() {
      let genre = song.genre.clone().unwrap_or_else(|| UNKNOWN_GENRE.to_string());
      *counts.entry(genre).or_insert(0) += 1;
    }
    counts
  }

  /// Duración total del catálogo en segundos.
  pub fn total_duration(&self) -> u64 {
    total_duration(self.songs.values())
  }
}

fn song_not_found(id: SongId) -> CoreError {
  CoreError::not_found(format!("song {id}"))
}
