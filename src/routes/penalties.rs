use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{CycleId, GroupId, PenaltyId, TypeConstraintError};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::penalties::{
    PenaltyFilter, list_group_penalties as list_group_penalties_service,
    pay_penalty as pay_penalty_service,
};

/// Query string shared by the group and member penalty listings.
#[derive(Deserialize, Debug, Default)]
pub struct PenaltiesQueryParams {
    pub cycle_id: Option<i32>,
    pub paid: Option<bool>,
    pub page: Option<usize>,
}

impl TryFrom<PenaltiesQueryParams> for PenaltyFilter {
    type Error = TypeConstraintError;

    fn try_from(value: PenaltiesQueryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            cycle_id: value.cycle_id.map(CycleId::new).transpose()?,
            paid: value.paid,
            page: value.page,
        })
    }
}

#[get("/groups/{group_id}/penalties")]
pub async fn list_group_penalties(
    group_id: web::Path<i32>,
    params: web::Query<PenaltiesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let filter = match PenaltyFilter::try_from(params.into_inner()) {
        Ok(filter) => filter,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let now = server_config.local_now();
    match list_group_penalties_service(group_id, filter, &user, repo.get_ref(), now) {
        Ok(penalties) => HttpResponse::Ok().json(penalties),
        Err(err) => error_response(err),
    }
}

#[post("/penalties/{penalty_id}/pay")]
pub async fn pay_penalty(
    penalty_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let penalty_id: PenaltyId = match parse_id(penalty_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match pay_penalty_service(penalty_id, &user, repo.get_ref(), server_config.local_now()) {
        Ok(penalty) => HttpResponse::Ok().json(penalty),
        Err(err) => error_response(err),
    }
}
