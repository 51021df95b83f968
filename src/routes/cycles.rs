use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::GroupId;
use crate::forms::cycles::{GenerateCycleForm, GenerateCycleFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::cycles::{
    generate_slots as generate_slots_service, list_cycles as list_cycles_service,
    reset_cycle as reset_cycle_service,
};

#[get("/groups/{group_id}/cycles")]
pub async fn list_cycles(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match list_cycles_service(group_id, &user, repo.get_ref()) {
        Ok(cycles) => HttpResponse::Ok().json(cycles),
        Err(err) => error_response(err),
    }
}

#[post("/groups/{group_id}/cycles")]
pub async fn generate_slots(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<GenerateCycleForm>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: GenerateCycleFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let now = server_config.local_now();
    match generate_slots_service(group_id, payload, &user, repo.get_ref(), now) {
        Ok(cycle) => HttpResponse::Created().json(cycle),
        Err(err) => error_response(err),
    }
}

#[post("/groups/{group_id}/cycles/reset")]
pub async fn reset_cycle(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match reset_cycle_service(group_id, &user, repo.get_ref(), server_config.local_now()) {
        Ok(cycle) => HttpResponse::Ok().json(cycle),
        Err(err) => error_response(err),
    }
}
