use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::location::{LocationLevel, NewLocation};
use crate::domain::types::{LocationId, LocationName, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct AddLocationForm {
    #[validate(range(min = 1))]
    pub parent_id: Option<i32>,
    #[validate(length(min = 1))]
    pub level: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

#[derive(Debug, Error)]
pub enum AddLocationFormError {
    #[error("Location form validation failed: {0}")]
    Validation(String),
    #[error("Location form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddLocationFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddLocationFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddLocationForm> for NewLocation {
    type Error = AddLocationFormError;

    fn try_from(value: AddLocationForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            parent_id: value.parent_id.map(LocationId::new).transpose()?,
            level: LocationLevel::try_from(value.level)?,
            name: LocationName::new(value.name)?,
        })
    }
}
