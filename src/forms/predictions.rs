use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::prediction::MemberProfileFeatures;

/// Features about the member that the savings engine does not track.
#[derive(Deserialize, Validate)]
pub struct LoanPredictionForm {
    #[serde(default)]
    pub has_guardian: bool,
    /// 0 = no loans; higher values mean a better repayment history.
    #[validate(range(min = 0, max = 4))]
    pub recent_loan_payment_status: i32,
}

#[derive(Debug, Error)]
pub enum LoanPredictionFormError {
    #[error("Loan prediction form validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for LoanPredictionFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<LoanPredictionForm> for MemberProfileFeatures {
    type Error = LoanPredictionFormError;

    fn try_from(value: LoanPredictionForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            has_guardian: value.has_guardian,
            recent_loan_payment_status: value.recent_loan_payment_status,
        })
    }
}
