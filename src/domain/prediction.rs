//! Feature set and response of the external loan prediction model.

use serde::{Deserialize, Serialize};

/// Earliest year accepted for join and creation dates.
pub const MIN_YEAR: i32 = 1900;

/// Features sent to the prediction service.
///
/// Saving features are derived from the engine's data; the remaining ones
/// are supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanPredictionInput {
    pub saving_times_per_period: i32,
    /// 1 = daily, 2 = weekly, 3 = monthly.
    pub saving_frequency: i32,
    pub total_current_saving: f64,
    pub total_saving_cycles: i32,
    pub completed_saving_cycles: i32,
    pub user_savings_made: i32,
    pub has_guardian: i32,
    pub recent_loan_payment_status: i32,
    pub user_joined_year: i32,
    pub ikimina_created_year: i32,
}

/// Caller-supplied features that the engine does not own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberProfileFeatures {
    pub has_guardian: bool,
    pub recent_loan_payment_status: i32,
}

/// Model answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanPrediction {
    pub allowed_loan: f64,
    #[serde(default)]
    pub message: String,
}
