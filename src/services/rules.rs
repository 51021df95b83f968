use chrono::NaiveDateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::penalty::PenaltyConfig;
use crate::domain::types::GroupId;
use crate::forms::rules::SetRulesFormPayload;
use crate::repository::{CycleReader, GroupReader, PenaltyConfigReader, PenaltyConfigWriter};

use super::{ServiceError, ServiceResult, load_group};

pub fn show_rules<R>(
    group_id: GroupId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<PenaltyConfig>
where
    R: PenaltyConfigReader,
{
    if !user.can_view_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_penalty_config(group_id) {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Err(ServiceError::NotFound("saving rules".into())),
        Err(e) => {
            log::error!("Failed to get saving rules of group {group_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Replaces the group's penalty amounts, grace window and saving unit.
///
/// Rules are frozen while a cycle is active.
pub fn set_rules<R>(
    group_id: GroupId,
    payload: SetRulesFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<PenaltyConfig>
where
    R: GroupReader + CycleReader + PenaltyConfigWriter,
{
    if !user.can_manage_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    load_group(repo, group_id)?;

    match repo.get_active_cycle(group_id) {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict(
                "Saving cycle is active. Rules cannot be changed now.".into(),
            ));
        }
        Err(e) => {
            log::error!("Failed to get active cycle of group {group_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.upsert_penalty_config(&payload.into_config(group_id, now)) {
        Ok(config) => {
            log::info!("Saving rules of group {group_id} updated");
            Ok(config)
        }
        Err(e) => {
            log::error!("Failed to save saving rules of group {group_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
