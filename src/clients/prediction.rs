//! HTTP client for the external loan prediction model.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::domain::prediction::{LoanPrediction, LoanPredictionInput};

/// Loan prediction client errors.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("prediction service timed out")]
    Timeout,

    #[error("prediction service returned {0}: {1}")]
    Api(u16, String),

    #[error("invalid prediction response: {0}")]
    Parse(String),
}

/// Anything able to score a member's loan eligibility.
pub trait LoanPredictor {
    fn predict(
        &self,
        input: &LoanPredictionInput,
    ) -> impl Future<Output = Result<LoanPrediction, PredictionError>> + Send;
}

/// Calls `POST {url}` with the feature set as JSON.
#[derive(Clone)]
pub struct HttpLoanPredictor {
    http_client: reqwest::Client,
    url: String,
}

impl HttpLoanPredictor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PredictionError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }
}

impl LoanPredictor for HttpLoanPredictor {
    async fn predict(
        &self,
        input: &LoanPredictionInput,
    ) -> Result<LoanPrediction, PredictionError> {
        log::debug!("Requesting loan prediction from {}", self.url);

        let response = self
            .http_client
            .post(&self.url)
            .json(input)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PredictionError::Timeout
                } else {
                    PredictionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PredictionError::Api(status.as_u16(), error_text));
        }

        response
            .json::<LoanPrediction>()
            .await
            .map_err(|e| PredictionError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_timeout() {
        let client =
            HttpLoanPredictor::new("http://localhost:5000/predict", Duration::from_secs(2));
        assert!(client.is_ok());
    }

    #[actix_web::test]
    async fn unreachable_service_is_a_network_error() {
        // Port 9 (discard) is closed on test hosts.
        let client =
            HttpLoanPredictor::new("http://127.0.0.1:9/predict", Duration::from_secs(2)).unwrap();
        let input = LoanPredictionInput {
            saving_times_per_period: 1,
            saving_frequency: 1,
            total_current_saving: 0.0,
            total_saving_cycles: 0,
            completed_saving_cycles: 0,
            user_savings_made: 0,
            has_guardian: 0,
            recent_loan_payment_status: 0,
            user_joined_year: 2024,
            ikimina_created_year: 2024,
        };
        let err = client.predict(&input).await.unwrap_err();
        assert!(matches!(
            err,
            PredictionError::Network(_) | PredictionError::Timeout
        ));
    }
}
