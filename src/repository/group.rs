use diesel::prelude::*;

use crate::domain::group::Group;
use crate::domain::member::Member;
use crate::domain::types::{GroupId, MemberId};
use crate::models::group::Group as DbGroup;
use crate::models::member::Member as DbMember;
use crate::repository::{DieselRepository, GroupReader, MemberReader, RepositoryResult};

impl GroupReader for DieselRepository {
    fn get_group_by_id(&self, id: GroupId) -> RepositoryResult<Option<Group>> {
        use crate::schema::groups;

        let mut conn = self.conn()?;

        let group = groups::table
            .filter(groups::id.eq(id.get()))
            .first::<DbGroup>(&mut conn)
            .optional()?;

        let group = group.map(TryInto::try_into).transpose()?;
        Ok(group)
    }
}

impl MemberReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        let member = members::table
            .filter(members::id.eq(id.get()))
            .first::<DbMember>(&mut conn)
            .optional()?;

        let member = member.map(TryInto::try_into).transpose()?;
        Ok(member)
    }

    fn list_active_members(&self, group_id: GroupId) -> RepositoryResult<Vec<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        let members = members::table
            .filter(members::group_id.eq(group_id.get()))
            .filter(members::active.eq(true))
            .order(members::id.asc())
            .load::<DbMember>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Member>, _>>()?;

        Ok(members)
    }
}
