use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::penalty::SlotState;
use crate::domain::types::{CycleId, GroupId, MemberId, TypeConstraintError};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::slots::{SlotFilter, list_slots as list_slots_service};

#[derive(Deserialize, Debug, Default)]
pub struct SlotsQueryParams {
    pub cycle_id: Option<i32>,
    pub member_id: Option<i32>,
    pub state: Option<String>,
}

impl TryFrom<SlotsQueryParams> for SlotFilter {
    type Error = TypeConstraintError;

    fn try_from(value: SlotsQueryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            cycle_id: value.cycle_id.map(CycleId::new).transpose()?,
            member_id: value.member_id.map(MemberId::new).transpose()?,
            state: value.state.as_deref().map(SlotState::try_from).transpose()?,
        })
    }
}

#[get("/groups/{group_id}/slots")]
pub async fn list_slots(
    group_id: web::Path<i32>,
    params: web::Query<SlotsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let filter = match SlotFilter::try_from(params.into_inner()) {
        Ok(filter) => filter,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let now = server_config.local_now();
    match list_slots_service(group_id, filter, &user, repo.get_ref(), now) {
        Ok(slots) => HttpResponse::Ok().json(slots),
        Err(err) => error_response(err),
    }
}
