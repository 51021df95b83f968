use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::frequency::NewFrequencyCategory;
use crate::domain::types::{FrequencyKind, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: FrequencyKind,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self, now: NaiveDateTime) -> NewFrequencyCategory {
        NewFrequencyCategory {
            name: self.name,
            created_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Add category form validation failed: {0}")]
    Validation(String),
    #[error("Add category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: FrequencyKind::try_from(value.name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        let payload: AddCategoryFormPayload = AddCategoryForm {
            name: "Monthly".into(),
        }
        .try_into()
        .unwrap();
        assert_eq!(payload.name, FrequencyKind::Monthly);
    }

    #[test]
    fn rejects_unknown_and_empty_names() {
        let err = AddCategoryFormPayload::try_from(AddCategoryForm {
            name: "yearly".into(),
        })
        .unwrap_err();
        assert!(matches!(err, AddCategoryFormError::TypeConstraint(_)));

        let err = AddCategoryFormPayload::try_from(AddCategoryForm { name: String::new() })
            .unwrap_err();
        assert!(matches!(err, AddCategoryFormError::Validation(_)));
    }
}
