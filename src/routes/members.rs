use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::MemberId;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::penalties::PenaltiesQueryParams;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::penalties::{
    PenaltyFilter, list_member_penalties as list_member_penalties_service,
};
use crate::services::savings::list_member_savings as list_member_savings_service;

#[derive(Deserialize, Debug, Default)]
pub struct SavingsQueryParams {
    pub page: Option<usize>,
}

#[get("/members/{member_id}/savings")]
pub async fn list_member_savings(
    member_id: web::Path<i32>,
    params: web::Query<SavingsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let member_id: MemberId = match parse_id(member_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let page = params.page.unwrap_or(1);
    match list_member_savings_service(member_id, page, &user, repo.get_ref()) {
        Ok(savings) => HttpResponse::Ok().json(savings),
        Err(err) => error_response(err),
    }
}

#[get("/members/{member_id}/penalties")]
pub async fn list_member_penalties(
    member_id: web::Path<i32>,
    params: web::Query<PenaltiesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let member_id: MemberId = match parse_id(member_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let filter = match PenaltyFilter::try_from(params.into_inner()) {
        Ok(filter) => filter,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let now = server_config.local_now();
    match list_member_penalties_service(member_id, filter, &user, repo.get_ref(), now) {
        Ok(penalties) => HttpResponse::Ok().json(penalties),
        Err(err) => error_response(err),
    }
}
