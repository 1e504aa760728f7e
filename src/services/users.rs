//! User management service

use crate::{
    error::AppResult,
    models::{
        user::{CreateUser, UpdateUser},
        ListQuery, User,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<User>> {
        self.repository.users.list(query).await
    }

    /// Create a user with the caller-chosen id
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut session = self.repository.session().await?;
        let user = self.repository.users.create(&mut session, data).await?;
        session.commit().await?;

        tracing::info!(user_id = user.user_id, "User created");
        Ok(user)
    }

    /// Apply a partial update
    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        let mut session = self.repository.session().await?;
        let current = self.repository.users.get_for_update(&mut session, id).await?;
        if data.is_empty() {
            return Ok(current);
        }

        let user = self.repository.users.update(&mut session, id, data).await?;
        session.commit().await?;

        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }
}
