use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed set of customer categories used both as an attribute and as the
/// grouping key of the category report.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Gold,
    Silver,
    Bronze,
}

/// Raised when a string does not name a [`Category`] member.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl Category {
    /// Filter sentinel meaning "no category restriction". Not a member.
    pub const ALL: &'static str = "All";

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Gold => "Gold",
            Category::Silver => "Silver",
            Category::Bronze => "Bronze",
        }
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Gold" => Ok(Category::Gold),
            "Silver" => Ok(Category::Silver),
            "Bronze" => Ok(Category::Bronze),
            other => Err(CategoryParseError(other.to_string())),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_member_names() {
        assert_eq!("Gold".parse::<Category>().unwrap(), Category::Gold);
        assert_eq!("Bronze".parse::<Category>().unwrap(), Category::Bronze);
    }

    #[test]
    fn rejects_unknown_and_sentinel_values() {
        assert!("gold".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
        // "All" is a filter sentinel, never a member.
        assert_eq!(
            Category::ALL.parse::<Category>(),
            Err(CategoryParseError("All".to_string()))
        );
    }
}
