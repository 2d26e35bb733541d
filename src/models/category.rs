//! Expense categories
//!
//! The category set is closed: every expense carries exactly one of these
//! ten tags. Each tag maps to a fixed accent colour used by calendar chips
//! and the breakdown chart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification tag attached to an expense
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Utilities,
    Housing,
    Health,
    Education,
    Travel,
    #[default]
    Other,
}

impl ExpenseCategory {
    /// All categories in their canonical display order
    pub const ALL: [ExpenseCategory; 10] = [
        Self::Food,
        Self::Transportation,
        Self::Entertainment,
        Self::Shopping,
        Self::Utilities,
        Self::Housing,
        Self::Health,
        Self::Education,
        Self::Travel,
        Self::Other,
    ];

    /// Lower-case tag as stored on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Utilities => "utilities",
            Self::Housing => "housing",
            Self::Health => "health",
            Self::Education => "education",
            Self::Travel => "travel",
            Self::Other => "other",
        }
    }

    /// Capitalised name for legends and tables
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Housing => "Housing",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }

    /// Accent colour family
    pub fn accent(&self) -> &'static str {
        match self {
            Self::Food => "red",
            Self::Transportation => "blue",
            Self::Entertainment => "purple",
            Self::Shopping => "pink",
            Self::Utilities => "yellow",
            Self::Housing => "green",
            Self::Health => "teal",
            Self::Education => "indigo",
            Self::Travel => "orange",
            Self::Other => "gray",
        }
    }

    /// Hex colour of the chart slice
    pub fn chart_color(&self) -> &'static str {
        match self {
            Self::Food => "#f87171",
            Self::Transportation => "#60a5fa",
            Self::Entertainment => "#c084fc",
            Self::Shopping => "#f472b6",
            Self::Utilities => "#fbbf24",
            Self::Housing => "#4ade80",
            Self::Health => "#2dd4bf",
            Self::Education => "#818cf8",
            Self::Travel => "#fb923c",
            Self::Other => "#9ca3af",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            ExpenseCategory::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ten_distinct_categories() {
        let tags: HashSet<_> = ExpenseCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(tags.len(), 10);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Food".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Food);
        assert_eq!(
            " TRAVEL ".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Travel
        );
        assert!("groceries".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_colors() {
        assert_eq!(ExpenseCategory::Food.accent(), "red");
        assert_eq!(ExpenseCategory::Housing.chart_color(), "#4ade80");
        assert_eq!(ExpenseCategory::Other.chart_color(), "#9ca3af");
    }

    #[test]
    fn test_serde_uses_lowercase_tag() {
        let json = serde_json::to_string(&ExpenseCategory::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");
        let back: ExpenseCategory = serde_json::from_str("\"utilities\"").unwrap();
        assert_eq!(back, ExpenseCategory::Utilities);
    }
}
