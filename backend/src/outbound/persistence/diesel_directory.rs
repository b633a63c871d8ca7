//! PostgreSQL-backed directory adapter.
//!
//! Reads one employee by primary key and every administrator e-mail. The
//! identifier arrives as text; anything that is not a valid `users.user_id`
//! integer cannot match a row and is reported as "no such user" without a
//! round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{Directory, DirectoryError};
use crate::domain::{RecipientAddress, User, UserId};

use super::diesel_error_mapping::map_diesel_error;
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::{admins, users};

/// Diesel-backed implementation of the [`Directory`] port.
#[derive(Clone)]
pub struct DieselDirectory {
    pool: DbPool,
}

impl DieselDirectory {
    /// Create a directory reading through `pool`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/hr")).await?;
    /// let directory = DieselDirectory::new(pool);
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_primary_key(id: &UserId) -> Option<i32> {
    id.as_ref().parse().ok()
}

fn row_to_user(row: UserRow) -> Result<User, DirectoryError> {
    let id = UserId::new(row.user_id.to_string())
        .map_err(|err| DirectoryError::query(format!("user row {}: {err}", row.user_id)))?;
    Ok(User::builder(id, row.full_name)
        .email(row.email)
        .phone(row.phone)
        .blood_group(row.blood_group)
        .emergency_contact(row.emergency_contact_name, row.emergency_contact_phone)
        .medical_conditions(row.medical_conditions)
        .allergies(row.allergies)
        .build())
}

/// Drop NULL and blank addresses; keep directory order.
fn collect_recipients(emails: Vec<Option<String>>) -> Vec<RecipientAddress> {
    emails
        .into_iter()
        .flatten()
        .filter_map(|email| RecipientAddress::new(email).ok())
        .collect()
}

#[async_trait]
impl Directory for DieselDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        let Some(key) = parse_primary_key(id) else {
            return Ok(None);
        };

        let mut conn = self.pool.get().await?;
        let row: Option<UserRow> = users::table
            .filter(users::user_id.eq(key))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "user lookup"))?;

        row.map(row_to_user).transpose()
    }

    async fn list_admin_emails(&self) -> Result<Vec<RecipientAddress>, DirectoryError> {
        let mut conn = self.pool.get().await?;
        let emails: Vec<Option<String>> = admins::table
            .select(admins::email)
            .order_by(admins::admin_id)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "admin lookup"))?;

        Ok(collect_recipients(emails))
    }
}
