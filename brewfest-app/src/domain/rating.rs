use brewfest_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1–10 score given to a brewery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i32) -> Result<Self, AppError> {
        if (Self::MIN as i32..=Self::MAX as i32).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(AppError::Validation(format!(
                "Rating must be between {} and {}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn emoji(self) -> &'static str {
        match self.0 {
            0..=2 => "...",
            3..=4 => "😐",
            5..=6 => "😊",
            7..=8 => "🍻",
            9 => "🔥",
            _ => "👑",
        }
    }
}

impl TryFrom<i32> for Rating {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0 as i32
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bounds() {
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(10).unwrap().value(), 10);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(11).is_err());
        assert!(Rating::new(-3).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Rating>("7").is_ok());
        assert!(serde_json::from_str::<Rating>("42").is_err());
    }

    #[test]
    fn test_emoji_buckets() {
        assert_eq!(Rating::new(2).unwrap().emoji(), "...");
        assert_eq!(Rating::new(4).unwrap().emoji(), "😐");
        assert_eq!(Rating::new(8).unwrap().emoji(), "🍻");
        assert_eq!(Rating::new(9).unwrap().emoji(), "🔥");
        assert_eq!(Rating::new(10).unwrap().emoji(), "👑");
    }
}
