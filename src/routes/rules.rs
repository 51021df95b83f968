use actix_web::{HttpResponse, Responder, get, put, web};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::GroupId;
use crate::forms::rules::{SetRulesForm, SetRulesFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::rules::{set_rules as set_rules_service, show_rules as show_rules_service};

#[get("/groups/{group_id}/rules")]
pub async fn show_rules(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_rules_service(group_id, &user, repo.get_ref()) {
        Ok(rules) => HttpResponse::Ok().json(rules),
        Err(err) => error_response(err),
    }
}

#[put("/groups/{group_id}/rules")]
pub async fn set_rules(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SetRulesForm>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: SetRulesFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let now = server_config.local_now();
    match set_rules_service(group_id, payload, &user, repo.get_ref(), now) {
        Ok(rules) => HttpResponse::Ok().json(rules),
        Err(err) => error_response(err),
    }
}
