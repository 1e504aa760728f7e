//! Members repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        member::{CreateMember, UpdateMember},
        ListQuery, Member,
    },
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List members in primary key order
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT * FROM members ORDER BY member_id LIMIT $1 OFFSET $2",
        )
        .bind(query.limit())
        .bind(query.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    /// Check that a member exists, holding a share lock until the session ends
    pub async fn exists(&self, conn: &mut PgConnection, id: i32) -> AppResult<bool> {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT member_id FROM members WHERE member_id = $1 FOR SHARE")
                .bind(id)
                .fetch_optional(conn)
                .await?;
        Ok(found.is_some())
    }

    /// Get member by ID, locking the row for the rest of the session
    pub async fn get_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE member_id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(Member::NOT_FOUND.to_string()))
    }

    /// Insert a new member
    pub async fn create(&self, conn: &mut PgConnection, data: &CreateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (member_id, phone_number, email, address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.member_id)
        .bind(data.phone_number)
        .bind(&data.email)
        .bind(&data.address)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::on_unique_violation(e, Member::DUPLICATE))
    }

    /// Write the fields present in `data`; the caller has already locked the row
    pub async fn update(&self, conn: &mut PgConnection, id: i32, data: &UpdateMember) -> AppResult<Member> {
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

        add_field!(data.phone_number, "phone_number");
        add_field!(data.email, "email");
        add_field!(data.address, "address");

        let query = format!(
            "UPDATE members SET {} WHERE member_id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Member>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.phone_number);
        bind_field!(data.email);
        bind_field!(data.address);

        builder
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::on_unique_violation(e, Member::DUPLICATE))?
            .ok_or_else(|| AppError::NotFound(Member::NOT_FOUND.to_string()))
    }

    /// Delete a member; rows still referenced by borrow records are kept
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::on_foreign_key_violation(e, Member::REFERENCED))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(Member::NOT_FOUND.to_string()));
        }
        Ok(())
    }
}
