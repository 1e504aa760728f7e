//! Member management service

use crate::{
    error::AppResult,
    models::{
        member::{CreateMember, UpdateMember},
        ListQuery, Member,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Member>> {
        self.repository.members.list(query).await
    }

    pub async fn create(&self, data: &CreateMember) -> AppResult<Member> {
        let mut session = self.repository.session().await?;
        let member = self.repository.members.create(&mut session, data).await?;
        session.commit().await?;

        tracing::info!(member_id = member.member_id, "Member created");
        Ok(member)
    }

    pub async fn update(&self, id: i32, data: &UpdateMember) -> AppResult<Member> {
        let mut session = self.repository.session().await?;
        let current = self.repository.members.get_for_update(&mut session, id).await?;
        if data.is_empty() {
            return Ok(current);
        }

        let member = self.repository.members.update(&mut session, id, data).await?;
        session.commit().await?;

        tracing::info!(member_id = id, "Member updated");
        Ok(member)
    }

    /// Delete a member that no borrow record references
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut session = self.repository.session().await?;
        self.repository.members.delete(&mut session, id).await?;
        session.commit().await?;

        tracing::info!(member_id = id, "Member deleted");
        Ok(())
    }
}
