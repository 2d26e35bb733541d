//! Expense model
//!
//! An expense is a dated, categorised amount. The ledger buckets expenses by
//! calendar day and calendar month only, so the date is stored without a
//! time of day.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique key, fixed at creation
    pub id: ExpenseId,

    /// Calendar date of the expense
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,

    /// Free-text label
    #[serde(default)]
    pub description: String,

    pub amount: Money,

    #[serde(default)]
    pub category: ExpenseCategory,
}

impl Expense {
    /// Create an expense with a freshly generated id
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
    ) -> Self {
        Self::with_id(ExpenseId::new(), date, description, amount, category)
    }

    /// Create an expense with a caller-supplied id
    pub fn with_id(
        id: ExpenseId,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            amount,
            category,
        }
    }

    /// Overwrite the fields present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: &ExpensePatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }

    /// Check the rules the entry form enforces before calling the ledger.
    ///
    /// The ledger itself accepts invalid expenses.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.category
        )
    }
}

/// Partial update for an expense; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<ExpenseCategory>,
}

impl ExpensePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NegativeAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Please provide a description"),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative: {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Parse a stored date.
///
/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`, or an RFC 3339
/// timestamp. Timestamps are converted to the local calendar day.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|dt| dt.date())
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid expense date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lunch() -> Expense {
        Expense::new(
            date(2024, 3, 5),
            "Lunch",
            Money::from_units(20),
            ExpenseCategory::Food,
        )
    }

    #[test]
    fn test_apply_patch_touches_only_given_fields() {
        let mut expense = lunch();
        let id = expense.id;

        expense.apply(&ExpensePatch::new().amount(Money::from_units(25)));

        assert_eq!(expense.id, id);
        assert_eq!(expense.amount, Money::from_units(25));
        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.category, ExpenseCategory::Food);
        assert_eq!(expense.date, date(2024, 3, 5));
    }

    #[test]
    fn test_empty_patch() {
        assert!(ExpensePatch::new().is_empty());
        assert!(!ExpensePatch::new().category(ExpenseCategory::Travel).is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(lunch().validate().is_ok());

        let mut blank = lunch();
        blank.description = "   ".into();
        assert_eq!(
            blank.validate(),
            Err(ExpenseValidationError::EmptyDescription)
        );

        let mut refund = lunch();
        refund.amount = Money::from_cents(-100);
        assert!(matches!(
            refund.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_parse_calendar_date_formats() {
        assert_eq!(parse_calendar_date("2024-03-05"), Some(date(2024, 3, 5)));
        assert_eq!(
            parse_calendar_date("2024-02-28T23:59:00"),
            Some(date(2024, 2, 28))
        );
        assert_eq!(
            parse_calendar_date("2024-03-01 00:01:00"),
            Some(date(2024, 3, 1))
        );
        assert!(parse_calendar_date("2024-13-01").is_none());
        assert!(parse_calendar_date("yesterday").is_none());
    }

    #[test]
    fn test_rfc3339_matches_local_day() {
        let stamp = "2024-03-05T12:00:00+00:00";
        let expected = DateTime::parse_from_rfc3339(stamp)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(parse_calendar_date(stamp), Some(expected));
    }

    #[test]
    fn test_deserialize_reconstructs_date() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "date": "2024-02-28T23:59:00",
            "description": "Taxi",
            "amount": 1250,
            "category": "transportation"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.date, date(2024, 2, 28));
        assert_eq!(expense.category, ExpenseCategory::Transportation);
        assert_eq!(expense.amount.cents(), 1250);
    }

    #[test]
    fn test_serialize_writes_plain_date() {
        let json = serde_json::to_value(lunch()).unwrap();
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["category"], "food");
    }
}
