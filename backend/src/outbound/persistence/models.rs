//! Internal Diesel row structs for directory reads.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use super::schema::users;

/// Columns of `users` needed to compose an alert.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub medical_conditions: Option<String>,
    pub allergies: Option<String>,
}
