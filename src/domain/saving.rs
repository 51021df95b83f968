use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::{MemberId, MemberName, PhoneNumber, SavingAmount, SavingId, SlotId};

/// A member's saving against one slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingRecord {
    pub id: SavingId,
    pub slot_id: SlotId,
    pub member_id: MemberId,
    pub amount: SavingAmount,
    pub phone: PhoneNumber,
    pub saved_at: NaiveDateTime,
}

/// Data required to insert a new [`SavingRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSavingRecord {
    pub slot_id: SlotId,
    pub member_id: MemberId,
    pub amount: SavingAmount,
    pub phone: PhoneNumber,
    pub saved_at: NaiveDateTime,
}

/// What one member of a group has saved across all cycles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberSavingTotal {
    pub member_id: MemberId,
    pub member_name: MemberName,
    pub total_saved: f64,
    pub total_saves: usize,
}

/// Status shown to members for a saving. Derived, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FriendlyStatus {
    #[serde(rename = "saved")]
    Saved,
    #[serde(rename = "saved but late")]
    SavedButLate,
}

impl FriendlyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::SavedButLate => "saved but late",
        }
    }
}

impl Display for FriendlyStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A saving is late only once the grace window after the scheduled time has passed.
pub fn friendly_status(
    scheduled_at: NaiveDateTime,
    grace: TimeDelta,
    saved_at: NaiveDateTime,
) -> FriendlyStatus {
    if saved_at > scheduled_at + grace {
        FriendlyStatus::SavedButLate
    } else {
        FriendlyStatus::Saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn early_and_in_grace_saves_are_on_time() {
        let grace = TimeDelta::minutes(60);
        assert_eq!(friendly_status(at(8, 0), grace, at(7, 45)), FriendlyStatus::Saved);
        assert_eq!(friendly_status(at(8, 0), grace, at(8, 30)), FriendlyStatus::Saved);
        assert_eq!(friendly_status(at(8, 0), grace, at(9, 0)), FriendlyStatus::Saved);
    }

    #[test]
    fn saves_after_grace_are_late() {
        let grace = TimeDelta::minutes(60);
        assert_eq!(
            friendly_status(at(8, 0), grace, at(9, 1)),
            FriendlyStatus::SavedButLate
        );
        assert_eq!(
            friendly_status(at(8, 0), TimeDelta::zero(), at(8, 1)).as_str(),
            "saved but late"
        );
    }
}
