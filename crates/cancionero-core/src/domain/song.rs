use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::SongId;
use crate::domain::rating::Rating;
use crate::errors::CoreError;

/// Una canción registrada en el catálogo.
///
/// `id` y `date_added` se fijan al darla de alta y no cambian nunca; el resto
/// de campos solo se modifica a través de [`Catalog::update`](crate::services::Catalog::update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  /// Identificador único, nunca reutilizado.
  pub id: SongId,

  /// Título, obligatorio y no vacío.
  pub title: String,

  /// Intérprete principal, obligatorio y no vacío.
  pub artist: String,

  /// Género libre (`"Rock"`, `"J-pop"`...). `None` si no se indicó.
  #[serde(default)]
  pub genre: Option<String>,

  /// Duración total en segundos.
  pub duration_seconds: u32,

  /// Valoración del usuario; `None` = sin valorar.
  #[serde(default)]
  pub rating: Option<Rating>,

  /// Archivo de audio asociado, si lo hay.
  #[serde(default, alias = "filepath")]
  pub file_path: Option<PathBuf>,

  /// Portada de la canción (PNG preferentemente).
  #[serde(default)]
  pub cover_path: Option<PathBuf>,

  /// Momento del alta en el catálogo.
  #[serde(default = "Utc::now")]
  pub date_added: DateTime<Utc>,
}

impl Song {
  pub(crate) fn new(id: SongId, fields: SongFields, date_added: DateTime<Utc>) -> Self {
    let mut song = Song {
      id,
      title: String::new(),
      artist: String::new(),
      genre: None,
      duration_seconds: 0,
      rating: None,
      file_path: None,
      cover_path: None,
      date_added,
    };
    song.apply(fields);
    song
  }

  /// Sustituye los campos mutables conservando `id` y `date_added`.
  pub(crate) fn apply(&mut self, fields: SongFields) {
    self.title = fields.title;
    self.artist = fields.artist;
    self.genre = fields.genre;
    self.duration_seconds = fields.duration_seconds;
    self.rating = fields.rating;
    self.file_path = fields.file_path;
    self.cover_path = fields.cover_path;
  }

  /// Revalida una canción que viene de fuera (p. ej. de un archivo guardado).
  pub(crate) fn normalized(self) -> Result<Song, CoreError> {
    let title = required_text("title", &self.title)?;
    let artist = required_text("artist", &self.artist)?;
    Ok(Song {
      title,
      artist,
      genre: optional_text(self.genre.as_deref()),
      file_path: optional_path(self.file_path),
      cover_path: optional_path(self.cover_path),
      ..self
    })
  }

  pub fn duration_minutes(&self) -> f64 {
    f64::from(self.duration_seconds) / 60.0
  }

  /// `true` si `title` o `artist` contienen `needle`.
  ///
  /// `needle` debe llegar ya en minúsculas.
  pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
    self.title.to_lowercase().contains(needle) || self.artist.to_lowercase().contains(needle)
  }

  /// Parecido entre `keyword` y `"título artista"`, en `[0.0, 1.0]`.
  ///
  /// Se calcula como el índice de Jaccard entre los conjuntos de palabras
  /// (en minúsculas, separadas por espacios) de ambos textos. Si alguno de los
  /// dos no tiene palabras el resultado es `0.0`.
  pub fn similarity_score(&self, keyword: &str) -> f64 {
    let keyword = keyword.to_lowercase();
    let kw_words: HashSet<&str> = keyword.split_whitespace().collect();

    let text = format!("{} {}", self.title, self.artist).to_lowercase();
    let song_words: HashSet<&str> = text.split_whitespace().collect();

    if kw_words.is_empty() || song_words.is_empty() {
      return 0.0;
    }

    let common = kw_words.intersection(&song_words).count();
    let union = kw_words.union(&song_words).count();
    common as f64 / union as f64
  }
}

/// Suma de duraciones (en segundos) de un conjunto de canciones.
pub fn total_duration<'a, I>(songs: I) -> u64
where
  I: IntoIterator<Item = &'a Song>,
{
  songs.into_iter().map(|s| u64::from(s.duration_seconds)).sum()
}

/// Formatea segundos como `h:mm:ss` (`0:05:30`, `12:00:01`).
pub fn format_duration(total_seconds: u64) -> String {
  let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
  let (hours, minutes) = (minutes / 60, minutes % 60);
  format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Datos de entrada para crear o actualizar una canción.
///
/// Es el formato "crudo" que llega de la capa de presentación: la duración es
/// un entero con signo y la valoración un `u8` cualquiera. Nada de esto se
/// comprueba hasta que el catálogo lo recibe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongDraft {
  pub title: String,
  pub artist: String,
  pub genre: Option<String>,
  pub duration_seconds: i64,
  pub rating: Option<u8>,
  pub file_path: Option<PathBuf>,
  pub cover_path: Option<PathBuf>,
}

impl SongDraft {
  pub fn new(title: impl Into<String>, artist: impl Into<String>, duration_seconds: i64) -> Self {
    Self { title: title.into(), artist: artist.into(), duration_seconds, ..Default::default() }
  }

  pub fn genre(mut self, genre: impl Into<String>) -> Self {
    self.genre = Some(genre.into());
    self
  }

  pub fn rating(mut self, rating: u8) -> Self {
    self.rating = Some(rating);
    self
  }

  pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.file_path = Some(path.into());
    self
  }

  pub fn cover_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.cover_path = Some(path.into());
    self
  }

  pub(crate) fn validate(self) -> Result<SongFields, CoreError> {
    let title = required_text("title", &self.title)?;
    let artist = required_text("artist", &self.artist)?;

    if self.duration_seconds < 0 {
      return Err(CoreError::validation(format!(
        "duration must be non-negative, got {}",
        self.duration_seconds
      )));
    }
    let duration_seconds = u32::try_from(self.duration_seconds)
      .map_err(|_| CoreError::validation(format!("duration too large: {}", self.duration_seconds)))?;

    let rating = self
      .rating
      .map(|value| Rating::try_from(value).map_err(|e| CoreError::validation(e.to_string())))
      .transpose()?;

    Ok(SongFields {
      title,
      artist,
      genre: optional_text(self.genre.as_deref()),
      duration_seconds,
      rating,
      file_path: optional_path(self.file_path),
      cover_path: optional_path(self.cover_path),
    })
  }
}

/// Campos mutables ya validados de una canción.
#[derive(Debug, Clone)]
pub(crate) struct SongFields {
  title: String,
  artist: String,
  genre: Option<String>,
  duration_seconds: u32,
  rating: Option<Rating>,
  file_path: Option<PathBuf>,
  cover_path: Option<PathBuf>,
}

fn required_text(field: &str, value: &str) -> Result<String, CoreError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(CoreError::validation(format!("{field} must not be empty")));
  }
  Ok(trimmed.to_string())
}

fn optional_text(value: Option<&str>) -> Option<String> {
  value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn optional_path(path: Option<PathBuf>) -> Option<PathBuf> {
  path.filter(|p| !p.as_os_str().is_empty())
}
