//! JSON routes. Handlers convert input, call a service and map its result.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::domain::types::{GroupId, TypeConstraintError};
use crate::services::ServiceError;

pub mod categories;
pub mod cycles;
pub mod locations;
pub mod members;
pub mod penalties;
pub mod predictions;
pub mod rules;
pub mod savings;
pub mod schedules;
pub mod slots;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";
pub const GROUP_ID_HEADER: &str = "X-Group-Id";

/// Registers every route; mounted under `/api` by the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(categories::list_categories)
        .service(categories::add_category)
        .service(categories::delete_category)
        .service(schedules::show_schedule)
        .service(schedules::set_schedule)
        .service(rules::show_rules)
        .service(rules::set_rules)
        .service(cycles::list_cycles)
        .service(cycles::reset_cycle)
        .service(cycles::generate_slots)
        .service(slots::list_slots)
        .service(penalties::list_group_penalties)
        .service(penalties::pay_penalty)
        .service(savings::record_saving)
        .service(savings::group_savings_summary)
        .service(members::list_member_savings)
        .service(members::list_member_penalties)
        .service(predictions::predict_allowed_loan)
        .service(locations::list_roots)
        .service(locations::add_location)
        .service(locations::list_children)
        .service(locations::location_path);
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Maps a service failure onto its HTTP status with a `{"message"}` body.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let body = ErrorBody {
        message: err.to_string(),
    };
    match err {
        ServiceError::Unauthorized => HttpResponse::Forbidden().json(body),
        ServiceError::Validation(_) => HttpResponse::BadRequest().json(body),
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::ExternalService(_) => HttpResponse::BadGateway().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}

/// Converts a raw path id, answering 400 when it is not positive.
pub fn parse_id<T>(raw: i32) -> Result<T, HttpResponse>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    T::try_from(raw).map_err(|e| error_response(ServiceError::from(e)))
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

fn user_from_headers(req: &HttpRequest) -> Result<AuthenticatedUser, String> {
    let user_id = header(req, USER_ID_HEADER)
        .ok_or_else(|| format!("missing {USER_ID_HEADER} header"))?
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid {USER_ID_HEADER} header: {e}"))?;
    let role = header(req, USER_ROLE_HEADER)
        .ok_or_else(|| format!("missing {USER_ROLE_HEADER} header"))
        .and_then(|raw| Role::try_from(raw).map_err(|e| e.to_string()))?;
    let group_id = header(req, GROUP_ID_HEADER)
        .map(|raw| {
            raw.trim()
                .parse::<i32>()
                .map_err(|e| e.to_string())
                .and_then(|id| GroupId::new(id).map_err(|e| e.to_string()))
        })
        .transpose()
        .map_err(|e| format!("invalid {GROUP_ID_HEADER} header: {e}"))?;

    Ok(AuthenticatedUser {
        user_id,
        role,
        group_id,
    })
}

/// Identity forwarded by the authentication gateway.
impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(user_from_headers(req).map_err(|message| {
            log::warn!("Rejected request to {}: {message}", req.path());
            actix_web::error::InternalError::from_response(
                message.clone(),
                HttpResponse::Unauthorized().json(ErrorBody { message }),
            )
            .into()
        }))
    }
}
