use actix_web::{HttpResponse, Responder, post, web};

use crate::clients::prediction::HttpLoanPredictor;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::prediction::MemberProfileFeatures;
use crate::domain::types::MemberId;
use crate::forms::predictions::LoanPredictionForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::predictions::predict_allowed_loan as predict_allowed_loan_service;

#[post("/members/{member_id}/loan-prediction")]
pub async fn predict_allowed_loan(
    member_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    predictor: web::Data<HttpLoanPredictor>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<LoanPredictionForm>,
) -> impl Responder {
    let member_id: MemberId = match parse_id(member_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let profile: MemberProfileFeatures = match form.try_into() {
        Ok(profile) => profile,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let today = server_config.local_now().date();
    match predict_allowed_loan_service(
        member_id,
        profile,
        &user,
        repo.get_ref(),
        predictor.get_ref(),
        today,
    )
    .await
    {
        Ok(prediction) => HttpResponse::Ok().json(prediction),
        Err(err) => error_response(err),
    }
}
