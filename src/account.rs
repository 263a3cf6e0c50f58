use std::{cmp::Ordering, str::FromStr};

use crate::key::Keyed;

/// The number of delimited fields in a serialised [`Account`].
const N_FIELDS: usize = 6;

/// A customer account record, identified by [`Account::id`].
///
/// Accounts are compared and ordered by their identifier alone: two accounts
/// with the same `id` are equal regardless of their other fields.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    pub id: u32,
    pub credit_score: i32,
    pub age: u16,
    /// Years as a customer.
    pub tenure: u16,
    pub balance: f64,
    pub active: bool,
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl PartialOrd for Account {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Account {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Keyed for Account {
    type Key = u32;

    fn key(&self) -> Self::Key {
        self.id
    }
}

/// An error parsing a delimited [`Account`] record.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseAccountError {
    #[error("expected 6 fields, found {found}")]
    FieldCount { found: usize },

    #[error("invalid {field} value {value:?}")]
    InvalidField { field: &'static str, value: String },
}

fn parse_field<T>(field: &'static str, value: &str) -> Result<T, ParseAccountError>
where
    T: FromStr,
{
    value
        .parse()
        .map_err(|_| ParseAccountError::InvalidField {
            field,
            value: value.to_string(),
        })
}

/// Parse a single comma-delimited line of the form:
///
/// ```text
/// id,credit_score,age,tenure,balance,active
/// ```
///
/// Fields are trimmed. The age may be written as a decimal and is truncated.
/// The active flag is true for `1`, `1.0` or `true` (in any case), false for
/// any other numeric or boolean value. Fields beyond the sixth are ignored.
impl FromStr for Account {
    type Err = ParseAccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split(',').map(str::trim).collect::<Vec<_>>();
        if fields.len() < N_FIELDS {
            return Err(ParseAccountError::FieldCount {
                found: fields.len(),
            });
        }

        let age = parse_field::<f64>("age", fields[2])?;
        if !(0.0..=f64::from(u16::MAX)).contains(&age) {
            return Err(ParseAccountError::InvalidField {
                field: "age",
                value: fields[2].to_string(),
            });
        }

        Ok(Self {
            id: parse_field("id", fields[0])?,
            credit_score: parse_field("credit_score", fields[1])?,
            age: age as u16,
            tenure: parse_field("tenure", fields[3])?,
            balance: parse_field("balance", fields[4])?,
            active: parse_active(fields[5])?,
        })
    }
}

fn parse_active(value: &str) -> Result<bool, ParseAccountError> {
    if let Ok(v) = value.parse::<f64>() {
        return Ok(v == 1.0);
    }

    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseAccountError::InvalidField {
            field: "active",
            value: value.to_string(),
        }),
    }
}
