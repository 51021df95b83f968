use actix_web::{HttpResponse, Responder, get, put, web};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::GroupId;
use crate::forms::schedules::{SetScheduleForm, SetScheduleFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::schedules::{
    set_schedule as set_schedule_service, show_schedule as show_schedule_service,
};

#[get("/groups/{group_id}/schedule")]
pub async fn show_schedule(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_schedule_service(group_id, &user, repo.get_ref()) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(err) => error_response(err),
    }
}

#[put("/groups/{group_id}/schedule")]
pub async fn set_schedule(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SetScheduleForm>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: SetScheduleFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let now = server_config.local_now();
    match set_schedule_service(group_id, payload, &user, repo.get_ref(), now) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(err) => error_response(err),
    }
}
