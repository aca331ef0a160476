use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Valoración de una canción en la escala entera `1..=5`.
///
/// Una canción sin valorar se modela como `Option<Rating>::None`, nunca como
/// un cero. Al deserializar se vuelve a comprobar el rango, así que un archivo
/// de biblioteca con un `7` no llega a construir un `Rating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  /// Devuelve `None` si `value` está fuera de `1..=5`.
  pub fn new(value: u8) -> Option<Self> {
    (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
  }

  pub fn value(&self) -> u8 {
    self.0
  }

  /// Representación con estrellas para una valoración opcional.
  pub fn stars(rating: Option<Rating>) -> String {
    match rating {
      Some(r) => r.to_string(),
      None => "☆☆☆☆☆".to_string(),
    }
  }
}

/// Error producido cuando un entero no es una valoración válida.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rating must be between 1 and 5, got {value}")]
pub struct RatingError {
  pub value: u8,
}

impl TryFrom<u8> for Rating {
  type Error = RatingError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Rating::new(value).ok_or(RatingError { value })
  }
}

impl From<Rating> for u8 {
  fn from(rating: Rating) -> Self {
    rating.0
  }
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let full_stars = self.0 as usize;
    let empty_stars = Self::MAX as usize - full_stars;

    for _ in 0..full_stars {
      write!(f, "★")?;
    }
    for _ in 0..empty_stars {
      write!(f, "☆")?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_only_one_to_five() {
    assert!(Rating::new(0).is_none());
    assert!(Rating::new(6).is_none());
    assert_eq!(Rating::new(3).map(|r| r.value()), Some(3));
  }

  #[test]
  fn displays_stars() {
    assert_eq!(Rating::new(4).unwrap().to_string(), "★★★★☆");
    assert_eq!(Rating::stars(None), "☆☆☆☆☆");
  }

  #[test]
  fn deserialization_rejects_out_of_range() {
    assert!(serde_json::from_str::<Rating>("9").is_err());
    assert_eq!(serde_json::from_str::<Rating>("5").unwrap(), Rating::new(5).unwrap());
  }
}
