//! Users repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{CreateUser, UpdateUser},
        ListQuery, User,
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List users in primary key order
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY user_id LIMIT $1 OFFSET $2",
        )
        .bind(query.limit())
        .bind(query.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Get user by ID, locking the row for the rest of the session
    pub async fn get_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(User::NOT_FOUND.to_string()))
    }

    /// Insert a new user
    pub async fn create(&self, conn: &mut PgConnection, user: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, name, username, password)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user.user_id)
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::on_unique_violation(e, User::DUPLICATE))
    }

    /// Write the fields present in `data`; the caller has already locked the row
    pub async fn update(&self, conn: &mut PgConnection, id: i32, data: &UpdateUser) -> AppResult<User> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.username, "username");
        add_field!(data.password, "password");

        let query = format!(
            "UPDATE users SET {} WHERE user_id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, User>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.username);
        bind_field!(data.password);

        builder
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::on_unique_violation(e, User::DUPLICATE))?
            .ok_or_else(|| AppError::NotFound(User::NOT_FOUND.to_string()))
    }
}
