//! Penalty configuration, penalty records and the per-slot state machine.
//!
//! A (slot, member) pair moves `upcoming → pending → missed` as time passes,
//! or jumps to `saved` / `saved_late` when a saving is recorded.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::{
    GraceMinutes, GroupId, MemberId, PenaltyAmount, PenaltyId, PenaltyType, SavingRatio, SlotId,
    TypeConstraintError,
};

/// Per-group saving rules: penalty amounts, grace window and saving unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PenaltyConfig {
    pub group_id: GroupId,
    pub time_delay_penalty: PenaltyAmount,
    pub date_delay_penalty: PenaltyAmount,
    pub grace: GraceMinutes,
    pub saving_ratio: SavingRatio,
    pub updated_at: NaiveDateTime,
}

impl PenaltyConfig {
    pub fn grace_window(&self) -> TimeDelta {
        self.grace.as_duration()
    }

    /// Penalty owed for a slot that became late at `late_at`.
    ///
    /// Lateness on the scheduled calendar date costs the time-delay amount,
    /// anything later costs the date-delay amount.
    pub fn assess(
        &self,
        scheduled_at: NaiveDateTime,
        late_at: NaiveDateTime,
        saved: bool,
    ) -> (PenaltyType, PenaltyAmount) {
        if late_at.date() == scheduled_at.date() {
            (PenaltyType::TimeDelay, self.time_delay_penalty)
        } else if saved {
            (PenaltyType::DateDelay, self.date_delay_penalty)
        } else {
            (PenaltyType::Missed, self.date_delay_penalty)
        }
    }
}

/// Evaluation state of one (slot, member) pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Upcoming,
    Pending,
    Saved,
    SavedLate,
    Missed,
}

impl SlotState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Pending => "pending",
            Self::Saved => "saved",
            Self::SavedLate => "saved_late",
            Self::Missed => "missed",
        }
    }

    /// Whether a penalty is owed in this state.
    pub const fn is_penalised(self) -> bool {
        matches!(self, Self::SavedLate | Self::Missed)
    }

    /// Computes the state at `now` given the optional saving time.
    pub fn evaluate(
        scheduled_at: NaiveDateTime,
        grace: TimeDelta,
        saved_at: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Self {
        let deadline = scheduled_at + grace;
        match saved_at {
            Some(saved_at) if saved_at > deadline => Self::SavedLate,
            Some(_) => Self::Saved,
            None if now < scheduled_at => Self::Upcoming,
            None if now < deadline => Self::Pending,
            None => Self::Missed,
        }
    }
}

impl Display for SlotState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for SlotState {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "pending" => Ok(Self::Pending),
            "saved" => Ok(Self::Saved),
            "saved_late" => Ok(Self::SavedLate),
            "missed" => Ok(Self::Missed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "slot state: {other}"
            ))),
        }
    }
}

/// Monetary charge for a late or missed slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PenaltyRecord {
    pub id: PenaltyId,
    pub slot_id: SlotId,
    pub member_id: MemberId,
    pub penalty_type: PenaltyType,
    pub amount: PenaltyAmount,
    pub paid: bool,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new unpaid [`PenaltyRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPenaltyRecord {
    pub slot_id: SlotId,
    pub member_id: MemberId,
    pub penalty_type: PenaltyType,
    pub amount: PenaltyAmount,
    pub created_at: NaiveDateTime,
}

impl NewPenaltyRecord {
    /// Builds the penalty owed by `member_id` for a slot in a penalised state.
    ///
    /// `late_at` is the saving time for late saves and the evaluation time for misses.
    pub fn assess(
        config: &PenaltyConfig,
        slot_id: SlotId,
        member_id: MemberId,
        scheduled_at: NaiveDateTime,
        state: SlotState,
        late_at: NaiveDateTime,
    ) -> Option<Self> {
        if !state.is_penalised() {
            return None;
        }
        let (penalty_type, amount) =
            config.assess(scheduled_at, late_at, state == SlotState::SavedLate);
        Some(Self {
            slot_id,
            member_id,
            penalty_type,
            amount,
            created_at: late_at,
        })
    }
}
