//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values, amounts and calendar values are enforced at the
//! boundary.

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be positive was zero/negative or invalid.
    #[error("{0} must be greater than zero")]
    NonPositiveNumber(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A time of day could not be parsed as `HH:MM[:SS]`.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),
    /// A weekday name was not recognised.
    #[error("invalid weekday: {0}")]
    InvalidWeekday(String),
    /// A day of month outside `1..=31`.
    #[error("day of month must be between 1 and 31, got {0}")]
    InvalidDayOfMonth(i32),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new value ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

macro_rules! positive_f64_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            /// Constructs a strictly positive, finite numeric value.
            pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
                if value.is_finite() && value > 0.0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveNumber($field))
                }
            }

            /// Returns the raw `f64` value.
            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_negative_f64_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            /// Constructs a finite numeric value that is zero or greater.
            pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
                if value.is_finite() && value >= 0.0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `f64` value.
            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_negative_i32_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Constructs a value that must be zero or greater.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value >= 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `i32` value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

id_newtype!(GroupId, "Unique identifier for an Ikimina group.", "group_id");
id_newtype!(MemberId, "Unique identifier for a group member.", "member_id");
id_newtype!(
    CategoryId,
    "Unique identifier for a frequency category.",
    "category_id"
);
id_newtype!(CycleId, "Unique identifier for a saving cycle.", "cycle_id");
id_newtype!(SlotId, "Unique identifier for a saving slot.", "slot_id");
id_newtype!(
    SavingId,
    "Unique identifier for a saving record.",
    "saving_id"
);
id_newtype!(
    PenaltyId,
    "Unique identifier for a penalty record.",
    "penalty_id"
);
id_newtype!(
    LocationId,
    "Unique identifier for a location tree node.",
    "location_id"
);
id_newtype!(
    SlotPosition,
    "1-based rank of a slot inside its cycle.",
    "slot position"
);

non_empty_string_newtype!(GroupName, "Ikimina display name.", "group name");
non_empty_string_newtype!(MemberName, "Member full name.", "member name");
non_empty_string_newtype!(
    PhoneNumber,
    "Phone number or payment channel reference used for a saving.",
    "phone"
);
non_empty_string_newtype!(LocationName, "Location node name.", "location name");

positive_f64_newtype!(SavingAmount, "Positive amount saved for a slot.", "amount");
positive_f64_newtype!(
    SavingRatio,
    "Saving unit; saved amounts must be a multiple of it.",
    "saving ratio"
);
non_negative_f64_newtype!(
    PenaltyAmount,
    "Penalty charge in standard currency units.",
    "penalty amount"
);

non_negative_i32_newtype!(
    GraceMinutes,
    "Allowed delay in minutes after a slot's scheduled time.",
    "grace window"
);
non_negative_i32_newtype!(SlotCount, "Number of slots in a cycle.", "total slots");

impl GraceMinutes {
    /// The grace window as a chrono duration.
    pub fn as_duration(self) -> chrono::TimeDelta {
        chrono::TimeDelta::minutes(i64::from(self.0))
    }
}

impl SavingAmount {
    /// Whether this amount is a whole multiple of the saving unit.
    pub fn is_multiple_of(self, ratio: SavingRatio) -> bool {
        let units = self.0 / ratio.get();
        (units - units.round()).abs() < 1e-9
    }
}

/// A wall-clock time of day, rendered as `HH:MM:SS`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parses `HH:MM` or `HH:MM:SS`; components may omit leading zeros.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let invalid = || TypeConstraintError::InvalidTime(value.to_string());
        let parts: Vec<&str> = value.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.trim().parse().map_err(|_| invalid())?;
        }

        NaiveTime::from_hms_opt(numbers[0], numbers[1], numbers[2])
            .map(Self)
            .ok_or_else(invalid)
    }

    pub const fn from_naive(time: NaiveTime) -> Self {
        Self(time)
    }

    pub const fn get(self) -> NaiveTime {
        self.0
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TimeOfDay {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Day of a calendar month in `1..=31`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct DayOfMonth(u32);

impl DayOfMonth {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (1..=31).contains(&value) {
            Ok(Self(value as u32))
        } else {
            Err(TypeConstraintError::InvalidDayOfMonth(value))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i32> for DayOfMonth {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayOfMonth> for i32 {
    fn from(value: DayOfMonth) -> Self {
        value.0 as i32
    }
}

impl Display for DayOfMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses an English weekday name (`monday`, `Mon`, ...), ignoring case.
pub fn parse_weekday(value: &str) -> Result<Weekday, TypeConstraintError> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| TypeConstraintError::InvalidWeekday(value.to_string()))
}

/// Lower-case weekday name used in persistence.
pub const fn weekday_as_str(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Saving frequency of a group.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyKind {
    Daily,
    Weekly,
    Monthly,
}

impl FrequencyKind {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Numeric code understood by the loan prediction model.
    pub const fn model_code(self) -> i32 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 2,
            Self::Monthly => 3,
        }
    }
}

impl Display for FrequencyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for FrequencyKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "frequency category: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for FrequencyKind {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Reason a penalty was charged.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyType {
    /// Late, but on the scheduled calendar date.
    TimeDelay,
    /// Saved on a later calendar date.
    DateDelay,
    /// Not saved at all by the time the slot was evaluated on a later date.
    Missed,
}

impl PenaltyType {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeDelay => "time_delay",
            Self::DateDelay => "date_delay",
            Self::Missed => "missed",
        }
    }
}

impl Display for PenaltyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PenaltyType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "time_delay" => Ok(Self::TimeDelay),
            "date_delay" => Ok(Self::DateDelay),
            "missed" => Ok(Self::Missed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "penalty type: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for PenaltyType {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = MemberName::new("  Uwase  ").unwrap();
        assert_eq!(value.as_str(), "Uwase");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = SlotId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("slot_id"));
    }

    #[test]
    fn normalises_time_of_day() {
        assert_eq!(TimeOfDay::parse("8:5").unwrap().to_string(), "08:05:00");
        assert_eq!(TimeOfDay::parse("18:00:30").unwrap().to_string(), "18:00:30");
        assert!(TimeOfDay::parse("25:00").is_err());
        assert!(TimeOfDay::parse("noon").is_err());
        assert!(TimeOfDay::parse("08").is_err());
    }

    #[test]
    fn time_of_day_serializes_as_string() {
        let time = TimeOfDay::parse("07:30").unwrap();
        assert_eq!(serde_json::to_value(time).unwrap(), serde_json::json!("07:30:00"));
    }

    #[test]
    fn day_of_month_range_is_enforced() {
        assert!(DayOfMonth::new(31).is_ok());
        assert_eq!(
            DayOfMonth::new(32).unwrap_err(),
            TypeConstraintError::InvalidDayOfMonth(32)
        );
        assert!(DayOfMonth::new(0).is_err());
    }

    #[test]
    fn parses_weekdays_in_any_case() {
        assert_eq!(parse_weekday("Monday").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("thu").unwrap(), Weekday::Thu);
        assert!(parse_weekday("someday").is_err());
        assert_eq!(weekday_as_str(Weekday::Sun), "sunday");
    }

    #[test]
    fn saving_amount_multiple_check() {
        let ratio = SavingRatio::new(500.0).unwrap();
        assert!(SavingAmount::new(1500.0).unwrap().is_multiple_of(ratio));
        assert!(!SavingAmount::new(1250.0).unwrap().is_multiple_of(ratio));
    }

    #[test]
    fn frequency_kind_round_trips_names() {
        assert_eq!(FrequencyKind::try_from(" Weekly ").unwrap(), FrequencyKind::Weekly);
        assert!(FrequencyKind::try_from("hourly").is_err());
    }

    #[test]
    fn penalty_amount_allows_zero() {
        assert_eq!(PenaltyAmount::new(0.0).unwrap().get(), 0.0);
        assert_eq!(
            PenaltyAmount::new(-1.0).unwrap_err(),
            TypeConstraintError::NegativeNumber("penalty amount")
        );
    }
}
