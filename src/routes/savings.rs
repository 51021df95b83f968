use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{GroupId, SlotId};
use crate::forms::savings::{RecordSavingForm, RecordSavingFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::savings::{
    group_savings_summary as group_savings_summary_service,
    record_saving as record_saving_service,
};

#[post("/slots/{slot_id}/savings")]
pub async fn record_saving(
    slot_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<RecordSavingForm>,
) -> impl Responder {
    let slot_id: SlotId = match parse_id(slot_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: RecordSavingFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let now = server_config.local_now();
    match record_saving_service(slot_id, payload, &user, repo.get_ref(), now) {
        Ok(saving) => HttpResponse::Created().json(saving),
        Err(err) => error_response(err),
    }
}

#[get("/groups/{group_id}/savings/summary")]
pub async fn group_savings_summary(
    group_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let group_id: GroupId = match parse_id(group_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match group_savings_summary_service(group_id, &user, repo.get_ref()) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => error_response(err),
    }
}
