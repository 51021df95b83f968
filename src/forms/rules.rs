use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::penalty::PenaltyConfig;
use crate::domain::types::{
    GraceMinutes, GroupId, PenaltyAmount, SavingRatio, TypeConstraintError,
};

#[derive(Deserialize, Validate)]
pub struct SetRulesForm {
    #[validate(range(min = 0.0))]
    pub time_delay_penalty: f64,
    #[validate(range(min = 0.0))]
    pub date_delay_penalty: f64,
    /// Grace window ("saving period gap") in minutes.
    #[validate(range(min = 0, max = 1440))]
    pub time_limit_minutes: i32,
    #[validate(range(exclusive_min = 0.0))]
    pub saving_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetRulesFormPayload {
    pub time_delay_penalty: PenaltyAmount,
    pub date_delay_penalty: PenaltyAmount,
    pub grace: GraceMinutes,
    pub saving_ratio: SavingRatio,
}

impl SetRulesFormPayload {
    pub fn into_config(self, group_id: GroupId, now: NaiveDateTime) -> PenaltyConfig {
        PenaltyConfig {
            group_id,
            time_delay_penalty: self.time_delay_penalty,
            date_delay_penalty: self.date_delay_penalty,
            grace: self.grace,
            saving_ratio: self.saving_ratio,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum SetRulesFormError {
    #[error("Saving rules form validation failed: {0}")]
    Validation(String),
    #[error("Saving rules form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SetRulesFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SetRulesFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SetRulesForm> for SetRulesFormPayload {
    type Error = SetRulesFormError;

    fn try_from(value: SetRulesForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            time_delay_penalty: PenaltyAmount::new(value.time_delay_penalty)?,
            date_delay_penalty: PenaltyAmount::new(value.date_delay_penalty)?,
            grace: GraceMinutes::new(value.time_limit_minutes)?,
            saving_ratio: SavingRatio::new(value.saving_ratio)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SetRulesForm {
        SetRulesForm {
            time_delay_penalty: 200.0,
            date_delay_penalty: 500.0,
            time_limit_minutes: 60,
            saving_ratio: 1000.0,
        }
    }

    #[test]
    fn converts_valid_rules() {
        let payload = SetRulesFormPayload::try_from(form()).unwrap();
        assert_eq!(payload.grace.get(), 60);
        assert_eq!(payload.saving_ratio, 1000.0);
    }

    #[test]
    fn rejects_zero_saving_ratio_and_negative_penalties() {
        let err = SetRulesFormPayload::try_from(SetRulesForm {
            saving_ratio: 0.0,
            ..form()
        })
        .unwrap_err();
        assert!(matches!(err, SetRulesFormError::Validation(_)));

        let err = SetRulesFormPayload::try_from(SetRulesForm {
            date_delay_penalty: -5.0,
            ..form()
        })
        .unwrap_err();
        assert!(matches!(err, SetRulesFormError::Validation(_)));
    }
}
