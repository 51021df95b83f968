use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::location::NewLocation;
use crate::domain::types::LocationId;
use crate::forms::locations::AddLocationForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::ServiceError;
use crate::services::locations::{
    add_location as add_location_service, list_children as list_children_service,
    list_roots as list_roots_service, location_path as location_path_service,
};

#[get("/locations")]
pub async fn list_roots(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_roots_service(repo.get_ref()) {
        Ok(locations) => HttpResponse::Ok().json(locations),
        Err(err) => error_response(err),
    }
}

#[post("/locations")]
pub async fn add_location(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddLocationForm>,
) -> impl Responder {
    let location: NewLocation = match form.try_into() {
        Ok(location) => location,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match add_location_service(location, &user, repo.get_ref()) {
        Ok(location) => HttpResponse::Created().json(location),
        Err(err) => error_response(err),
    }
}

#[get("/locations/{location_id}/children")]
pub async fn list_children(
    location_id: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let location_id: LocationId = match parse_id(location_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match list_children_service(location_id, repo.get_ref()) {
        Ok(locations) => HttpResponse::Ok().json(locations),
        Err(err) => error_response(err),
    }
}

#[get("/locations/{location_id}/path")]
pub async fn location_path(
    location_id: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let location_id: LocationId = match parse_id(location_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match location_path_service(location_id, repo.get_ref()) {
        Ok(path) => HttpResponse::Ok().json(path),
        Err(err) => error_response(err),
    }
}
