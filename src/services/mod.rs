//! Core operations of the savings engine.
//!
//! Services are generic over repository traits, check the caller's rights
//! first and translate repository failures into [`ServiceError`] so that HTTP
//! routes stay thin wrappers. Operations that depend on the wall clock take
//! `now` explicitly, in the groups' local time.

use crate::domain::group::Group;
use crate::domain::member::Member;
use crate::domain::types::{GroupId, MemberId};
use crate::repository::{GroupReader, MemberReader};

pub mod categories;
pub mod cycles;
pub mod errors;
pub mod locations;
pub mod penalties;
pub mod predictions;
pub mod rules;
pub mod savings;
pub mod schedules;
pub mod slots;
#[cfg(test)]
pub(crate) mod fixtures;

pub use errors::{ServiceError, ServiceResult};

/// Loads a group or fails with `NotFound`.
fn load_group<R>(repo: &R, group_id: GroupId) -> ServiceResult<Group>
where
    R: GroupReader,
{
    match repo.get_group_by_id(group_id) {
        Ok(Some(group)) => Ok(group),
        Ok(None) => Err(ServiceError::NotFound("group".into())),
        Err(e) => {
            log::error!("Failed to get group {group_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Loads a member or fails with `NotFound`.
fn load_member<R>(repo: &R, member_id: MemberId) -> ServiceResult<Member>
where
    R: MemberReader,
{
    match repo.get_member_by_id(member_id) {
        Ok(Some(member)) => Ok(member),
        Ok(None) => Err(ServiceError::NotFound("member".into())),
        Err(e) => {
            log::error!("Failed to get member {member_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
