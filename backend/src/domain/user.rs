//! Employee records as read from the directory store.
//!
//! Users are registered elsewhere; this service only reads them to build an
//! alert. Optional columns stay optional here so the alert can say which
//! details are missing instead of inventing values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Identifier of a registered employee.
///
/// Only presence is validated. The directory decides whether the value names
/// a real record; a value it cannot interpret simply matches nothing.
///
/// # Examples
/// ```
/// use sos_backend::domain::UserId;
///
/// let id = UserId::new(" 42 ").expect("non-empty id");
/// assert_eq!(id.as_ref(), "42");
/// assert!(UserId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Trim and validate a raw identifier.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Employee profile used to compose an SOS alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    full_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    blood_group: Option<String>,
    emergency_contact_name: Option<String>,
    emergency_contact_phone: Option<String>,
    medical_conditions: Option<String>,
    allergies: Option<String>,
}

impl User {
    /// Start building a user from its identifier and name on file.
    pub fn builder(id: UserId, full_name: impl Into<String>) -> UserBuilder {
        UserBuilder::new(id, full_name)
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Full name shown in the alert. A blank name on file is `None`.
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn blood_group(&self) -> Option<&str> {
        self.blood_group.as_deref()
    }

    pub fn emergency_contact_name(&self) -> Option<&str> {
        self.emergency_contact_name.as_deref()
    }

    pub fn emergency_contact_phone(&self) -> Option<&str> {
        self.emergency_contact_phone.as_deref()
    }

    /// Free-text medical conditions.
    pub fn medical_conditions(&self) -> Option<&str> {
        self.medical_conditions.as_deref()
    }

    /// Free-text allergies.
    pub fn allergies(&self) -> Option<&str> {
        self.allergies.as_deref()
    }
}

/// Builder for [`User`].
///
/// Blank optional values are stored as `None`.
#[derive(Debug, Clone)]
pub struct UserBuilder {
    user: User,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl UserBuilder {
    fn new(id: UserId, full_name: impl Into<String>) -> Self {
        Self {
            user: User {
                id,
                full_name: non_blank(Some(full_name.into())),
                email: None,
                phone: None,
                blood_group: None,
                emergency_contact_name: None,
                emergency_contact_phone: None,
                medical_conditions: None,
                allergies: None,
            },
        }
    }

    pub fn email(mut self, email: Option<String>) -> Self {
        self.user.email = non_blank(email);
        self
    }

    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.user.phone = non_blank(phone);
        self
    }

    pub fn blood_group(mut self, blood_group: Option<String>) -> Self {
        self.user.blood_group = non_blank(blood_group);
        self
    }

    /// Set the emergency contact's name and phone together.
    pub fn emergency_contact(mut self, name: Option<String>, phone: Option<String>) -> Self {
        self.user.emergency_contact_name = non_blank(name);
        self.user.emergency_contact_phone = non_blank(phone);
        self
    }

    pub fn medical_conditions(mut self, conditions: Option<String>) -> Self {
        self.user.medical_conditions = non_blank(conditions);
        self
    }

    pub fn allergies(mut self, allergies: Option<String>) -> Self {
        self.user.allergies = non_blank(allergies);
        self
    }

    /// Finish the record.
    pub fn build(self) -> User {
        self.user
    }
}
