use chrono::{Datelike, NaiveDate};

use crate::clients::prediction::LoanPredictor;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::prediction::{
    LoanPrediction, LoanPredictionInput, MIN_YEAR, MemberProfileFeatures,
};
use crate::domain::types::MemberId;
use crate::repository::{
    CycleReader, GroupReader, MemberReader, SavingListQuery, SavingReader, ScheduleReader,
    SlotListQuery, SlotReader,
};

use super::{ServiceError, ServiceResult, load_group, load_member};

/// Derives the saving features of a member from the group's active cycle as of `today`.
pub fn build_prediction_input<R>(
    member_id: MemberId,
    profile: MemberProfileFeatures,
    repo: &R,
    today: NaiveDate,
) -> ServiceResult<LoanPredictionInput>
where
    R: GroupReader + MemberReader + ScheduleReader + CycleReader + SlotReader + SavingReader,
{
    let member = load_member(repo, member_id)?;
    let group = load_group(repo, member.group_id)?;

    let schedule = match repo.get_schedule(group.id) {
        Ok(Some(schedule)) => schedule,
        Ok(None) => return Err(ServiceError::NotFound("schedule".into())),
        Err(e) => {
            log::error!("Failed to get schedule of group {}: {e}", group.id);
            return Err(ServiceError::Internal);
        }
    };
    let cycle = match repo.get_active_cycle(group.id) {
        Ok(Some(cycle)) => cycle,
        Ok(None) => return Err(ServiceError::NotFound("active saving cycle".into())),
        Err(e) => {
            log::error!("Failed to get active cycle of group {}: {e}", group.id);
            return Err(ServiceError::Internal);
        }
    };

    let (total_slots, slots) = repo
        .list_slots(SlotListQuery::new(group.id).cycle(cycle.id))
        .map_err(|e| {
            log::error!("Failed to list slots of cycle {}: {e}", cycle.id);
            ServiceError::Internal
        })?;
    let completed = slots.iter().filter(|slot| slot.date <= today).count();

    let (savings_made, savings) = repo
        .list_savings(
            SavingListQuery::default()
                .member(member.id)
                .cycle(cycle.id)
                .slot_date_until(today),
        )
        .map_err(|e| {
            log::error!("Failed to list savings of member {}: {e}", member.id);
            ServiceError::Internal
        })?;
    let total_saved: f64 = savings.iter().map(|(record, _)| record.amount.get()).sum();

    let joined_year = member.joined_at.year();
    let created_year = group.created_at.year();
    if joined_year < MIN_YEAR || created_year < MIN_YEAR {
        return Err(ServiceError::Validation(format!(
            "join and creation years must not be before {MIN_YEAR}"
        )));
    }

    Ok(LoanPredictionInput {
        saving_times_per_period: schedule.definition.times_per_period() as i32,
        saving_frequency: schedule.definition.kind().model_code(),
        total_current_saving: total_saved,
        total_saving_cycles: total_slots as i32,
        completed_saving_cycles: completed as i32,
        user_savings_made: savings_made as i32,
        has_guardian: i32::from(profile.has_guardian),
        recent_loan_payment_status: profile.recent_loan_payment_status,
        user_joined_year: joined_year,
        ikimina_created_year: created_year,
    })
}

/// Asks the prediction model how much the member may borrow.
pub async fn predict_allowed_loan<R, P>(
    member_id: MemberId,
    profile: MemberProfileFeatures,
    user: &AuthenticatedUser,
    repo: &R,
    predictor: &P,
    today: NaiveDate,
) -> ServiceResult<LoanPrediction>
where
    R: GroupReader + MemberReader + ScheduleReader + CycleReader + SlotReader + SavingReader,
    P: LoanPredictor,
{
    let member = load_member(repo, member_id)?;
    if !user.can_act_for_member(&member) {
        return Err(ServiceError::Unauthorized);
    }

    let input = build_prediction_input(member_id, profile, repo, today)?;

    let prediction = predictor.predict(&input).await.map_err(|e| {
        log::error!("Loan prediction for member {member_id} failed: {e}");
        ServiceError::from(e)
    })?;
    log::info!(
        "Predicted allowed loan of {} for member {member_id}",
        prediction.allowed_loan
    );
    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Mutex;

    use super::*;
    use crate::clients::prediction::PredictionError;
    use crate::domain::types::{PhoneNumber, SavingAmount};
    use crate::forms::savings::RecordSavingFormPayload;
    use crate::services::fixtures::*;
    use crate::services::savings::record_saving;

    #[derive(Default)]
    struct RecordingPredictor {
        seen: Mutex<Option<LoanPredictionInput>>,
        fail: bool,
    }

    impl LoanPredictor for RecordingPredictor {
        fn predict(
            &self,
            input: &LoanPredictionInput,
        ) -> impl Future<Output = Result<LoanPrediction, PredictionError>> + Send {
            *self.seen.lock().unwrap() = Some(input.clone());
            let fail = self.fail;
            async move {
                if fail {
                    Err(PredictionError::Timeout)
                } else {
                    Ok(LoanPrediction {
                        allowed_loan: 50_000.0,
                        message: "ok".into(),
                    })
                }
            }
        }
    }

    fn profile() -> MemberProfileFeatures {
        MemberProfileFeatures {
            has_guardian: true,
            recent_loan_payment_status: 2,
        }
    }

    #[actix_web::test]
    async fn derives_features_from_active_cycle() {
        let repo = seeded_repo();
        set_weekly_schedule(&repo, &["monday", "thursday"], "18:00");
        let slots = start_cycle(&repo, 3, 16);
        for slot in &slots[..2] {
            let payload = RecordSavingFormPayload {
                member_id: None,
                amount: SavingAmount::new(1500.0).unwrap(),
                phone: PhoneNumber::new("0788000111").unwrap(),
            };
            record_saving(*slot, payload, &member_user(), &repo, at(3, 17, 0)).unwrap();
        }

        let predictor = RecordingPredictor::default();
        let prediction = predict_allowed_loan(
            member_id(1),
            profile(),
            &member_user(),
            &repo,
            &predictor,
            date(7),
        )
        .await
        .unwrap();
        assert_eq!(prediction.allowed_loan, 50_000.0);

        let input = predictor.seen.lock().unwrap().clone().unwrap();
        assert_eq!(input.saving_times_per_period, 2);
        assert_eq!(input.saving_frequency, 2);
        assert_eq!(input.total_saving_cycles, 4);
        assert_eq!(input.completed_saving_cycles, 2);
        assert_eq!(input.user_savings_made, 2);
        assert_eq!(input.total_current_saving, 3000.0);
        assert_eq!(input.has_guardian, 1);
        assert_eq!(input.user_joined_year, 2024);
        assert_eq!(input.ikimina_created_year, 2023);
    }

    #[actix_web::test]
    async fn service_failure_is_external_error() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        start_cycle(&repo, 1, 3);

        let predictor = RecordingPredictor {
            fail: true,
            ..RecordingPredictor::default()
        };
        let err =
            predict_allowed_loan(member_id(1), profile(), &manager(), &repo, &predictor, date(2))
                .await
                .unwrap_err();
        assert!(matches!(err, ServiceError::ExternalService(_)));
    }

    #[actix_web::test]
    async fn requires_active_cycle() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        let predictor = RecordingPredictor::default();

        let err =
            predict_allowed_loan(member_id(1), profile(), &manager(), &repo, &predictor, date(2))
                .await
                .unwrap_err();
        assert_eq!(err, ServiceError::NotFound("active saving cycle".into()));

        let err = predict_allowed_loan(
            member_id(4),
            profile(),
            &member_user(),
            &repo,
            &predictor,
            date(2),
        )
        .await
        .unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
    }
}
