use std::cmp::Ordering;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::song::Song;

/// Criterios de filtrado del catálogo.
///
/// Todos los criterios son opcionales; uno sin fijar no se comprueba. Los
/// límites de duración son inclusivos y el género se compara sin distinguir
/// mayúsculas ni espacios en los extremos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFilter {
  pub genre: Option<String>,
  pub min_duration: Option<u32>,
  pub max_duration: Option<u32>,
}

impl SongFilter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn genre(mut self, genre: impl Into<String>) -> Self {
    self.genre = Some(genre.into());
    self
  }

  pub fn min_duration(mut self, seconds: u32) -> Self {
    self.min_duration = Some(seconds);
    self
  }

  pub fn max_duration(mut self, seconds: u32) -> Self {
    self.max_duration = Some(seconds);
    self
  }

  pub fn matches(&self, song: &Song) -> bool {
    if let Some(genre) = &self.genre {
      let wanted = genre.trim().to_lowercase();
      match &song.genre {
        Some(g) if g.trim().to_lowercase() == wanted => {}
        _ => return false,
      }
    }
    if self.min_duration.is_some_and(|min| song.duration_seconds < min) {
      return false;
    }
    if self.max_duration.is_some_and(|max| song.duration_seconds > max) {
      return false;
    }
    true
  }
}

/// Campo por el que se ordena el catálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
  Title,
  Artist,
  Duration,
  DateAdded,
  Rating,
}

impl SortKey {
  /// Compara dos canciones solo por este campo (sin desempate).
  ///
  /// Título y artista se comparan sin distinguir mayúsculas. En `Rating`,
  /// una canción sin valorar va antes que cualquier valorada.
  pub fn compare(self, a: &Song, b: &Song) -> Ordering {
    match self {
      SortKey::Title => cmp_ignore_case(&a.title, &b.title),
      SortKey::Artist => cmp_ignore_case(&a.artist, &b.artist),
      SortKey::Duration => a.duration_seconds.cmp(&b.duration_seconds),
      SortKey::DateAdded => a.date_added.cmp(&b.date_added),
      SortKey::Rating => a.rating.cmp(&b.rating),
    }
  }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
  a.chars().flat_map(char::to_lowercase).cmp(b.chars().flat_map(char::to_lowercase))
}

/// Error producido cuando una cadena no corresponde a ningún [`SortKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort key: {input}")]
pub struct SortKeyParseError {
  pub input: String,
}

impl FromStr for SortKey {
  type Err = SortKeyParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace(['-', '_', ' '], "");

    let key = match normalized.as_str() {
      "title" => SortKey::Title,
      "artist" => SortKey::Artist,
      "duration" => SortKey::Duration,
      "dateadded" | "added" | "date" => SortKey::DateAdded,
      "rating" => SortKey::Rating,
      _ => return Err(SortKeyParseError { input: s.to_string() }),
    };

    Ok(key)
  }
}

impl fmt::Display for SortKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      SortKey::Title => "title",
      SortKey::Artist => "artist",
      SortKey::Duration => "duration",
      SortKey::DateAdded => "date-added",
      SortKey::Rating => "rating",
    };
    write!(f, "{}", text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_sort_keys() {
    assert_eq!("Title".parse::<SortKey>().unwrap(), SortKey::Title);
    assert_eq!("date_added".parse::<SortKey>().unwrap(), SortKey::DateAdded);
    assert_eq!(SortKey::DateAdded.to_string().parse::<SortKey>().unwrap(), SortKey::DateAdded);
    assert!("loudness".parse::<SortKey>().is_err());
  }

  #[test]
  fn case_insensitive_text_order() {
    assert_eq!(cmp_ignore_case("abba", "ABBA"), Ordering::Equal);
    assert_eq!(cmp_ignore_case("beatles", "ABBA"), Ordering::Greater);
  }
}
