use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{MemberId, PhoneNumber, SavingAmount, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct RecordSavingForm {
    /// Saving member; defaults to the caller when the caller is a member.
    #[validate(range(min = 1))]
    pub member_id: Option<i32>,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    /// Phone number or payment channel used.
    #[validate(length(min = 1))]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordSavingFormPayload {
    pub member_id: Option<MemberId>,
    pub amount: SavingAmount,
    pub phone: PhoneNumber,
}

#[derive(Debug, Error)]
pub enum RecordSavingFormError {
    #[error("Saving form validation failed: {0}")]
    Validation(String),
    #[error("Saving form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RecordSavingFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RecordSavingFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RecordSavingForm> for RecordSavingFormPayload {
    type Error = RecordSavingFormError;

    fn try_from(value: RecordSavingForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            member_id: value.member_id.map(MemberId::new).transpose()?,
            amount: SavingAmount::new(value.amount)?,
            phone: PhoneNumber::new(value.phone)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_phone_and_keeps_member() {
        let payload = RecordSavingFormPayload::try_from(RecordSavingForm {
            member_id: Some(4),
            amount: 1000.0,
            phone: " 0788000111 ".into(),
        })
        .unwrap();
        assert_eq!(payload.phone.as_str(), "0788000111");
        assert_eq!(payload.member_id, Some(MemberId::new(4).unwrap()));
    }

    #[test]
    fn rejects_non_positive_amount_and_blank_phone() {
        assert!(
            RecordSavingFormPayload::try_from(RecordSavingForm {
                member_id: None,
                amount: 0.0,
                phone: "0788".into(),
            })
            .is_err()
        );

        let err = RecordSavingFormPayload::try_from(RecordSavingForm {
            member_id: None,
            amount: 500.0,
            phone: "   ".into(),
        })
        .unwrap_err();
        assert!(matches!(err, RecordSavingFormError::TypeConstraint(_)));
    }
}
