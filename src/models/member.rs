use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::member::Member as DomainMember;
use crate::domain::types::{MemberName, PhoneNumber, TypeConstraintError};

/// Diesel model representing the `members` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::members)]
pub struct Member {
    pub id: i32,
    pub group_id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub active: bool,
    pub joined_at: NaiveDateTime,
}

impl TryFrom<Member> for DomainMember {
    type Error = TypeConstraintError;

    fn try_from(member: Member) -> Result<Self, Self::Error> {
        // Blank phones are stored by the member registry; treat them as absent.
        let phone = member
            .phone
            .filter(|phone| !phone.trim().is_empty())
            .map(PhoneNumber::new)
            .transpose()?;

        Ok(Self {
            id: member.id.try_into()?,
            group_id: member.group_id.try_into()?,
            name: MemberName::new(member.name)?,
            phone,
            active: member.active,
            joined_at: member.joined_at,
        })
    }
}
