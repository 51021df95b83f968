use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::schedule::ScheduleEntry;
use crate::domain::types::{CategoryId, DayOfMonth, TimeOfDay, TypeConstraintError, parse_weekday};

#[derive(Serialize, Deserialize, Validate)]
pub struct ScheduleEntryForm {
    pub weekday: Option<String>,
    #[validate(range(min = 1, max = 31))]
    pub day_of_month: Option<i32>,
    #[validate(length(min = 1))]
    pub time: String,
}

#[derive(Deserialize, Validate)]
pub struct SetScheduleForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub entries: Vec<ScheduleEntryForm>,
}

/// Typed schedule input; the shape is checked against the category later.
#[derive(Debug, Clone, PartialEq)]
pub struct SetScheduleFormPayload {
    pub category_id: CategoryId,
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Error)]
pub enum SetScheduleFormError {
    #[error("Schedule form validation failed: {0}")]
    Validation(String),
    #[error("Schedule form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SetScheduleFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SetScheduleFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ScheduleEntryForm> for ScheduleEntry {
    type Error = TypeConstraintError;

    fn try_from(value: ScheduleEntryForm) -> Result<Self, Self::Error> {
        Ok(Self {
            weekday: value
                .weekday
                .as_deref()
                .filter(|w| !w.trim().is_empty())
                .map(parse_weekday)
                .transpose()?,
            day_of_month: value.day_of_month.map(DayOfMonth::new).transpose()?,
            time: TimeOfDay::parse(&value.time)?,
        })
    }
}

impl TryFrom<SetScheduleForm> for SetScheduleFormPayload {
    type Error = SetScheduleFormError;

    fn try_from(value: SetScheduleForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let entries = value
            .entries
            .into_iter()
            .map(ScheduleEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            entries,
        })
    }
}
