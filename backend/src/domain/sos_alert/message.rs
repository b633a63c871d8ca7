//! Alert e-mail composition.

use crate::domain::{RecipientAddress, User};

use super::SosAlertError;

/// Subject line of every SOS alert.
pub const ALERT_SUBJECT: &str = "🚨 SOS Alert - Emergency Situation!";

const MISSING_VALUE: &str = "Not provided";

/// One broadcast e-mail addressed to every administrator.
///
/// ## Invariants
/// - `recipients` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    recipients: Vec<RecipientAddress>,
    subject: String,
    body: String,
}

impl AlertMessage {
    /// Build the alert for `user`, addressed to all of `recipients`.
    ///
    /// # Errors
    /// Returns [`SosAlertError::NoRecipients`] when `recipients` is empty.
    ///
    /// # Examples
    /// ```
    /// use sos_backend::domain::{AlertMessage, RecipientAddress, User, UserId};
    ///
    /// let user = User::builder(UserId::new("42").unwrap(), "Jane Doe")
    ///     .blood_group(Some("O+".to_owned()))
    ///     .build();
    /// let message =
    ///     AlertMessage::compose(&user, vec![RecipientAddress::new("a@x.com").unwrap()]).unwrap();
    /// assert!(message.body().contains("Jane Doe"));
    /// assert!(message.body().contains("🩸 Blood Group: O+"));
    /// ```
    pub fn compose(user: &User, recipients: Vec<RecipientAddress>) -> Result<Self, SosAlertError> {
        if recipients.is_empty() {
            return Err(SosAlertError::NoRecipients);
        }
        Ok(Self {
            recipients,
            subject: ALERT_SUBJECT.to_owned(),
            body: render_body(user),
        })
    }

    /// Every administrator address, in directory order.
    pub fn recipients(&self) -> &[RecipientAddress] {
        &self.recipients
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Plain-text body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING_VALUE)
}

fn render_body(user: &User) -> String {
    format!(
        "Emergency alert triggered by {name}.\n\n\
         📧 Email: {email}\n\
         📞 Phone: {phone}\n\
         🩸 Blood Group: {blood_group}\n\
         🆘 Emergency Contact: {contact_name} ({contact_phone})\n\
         🏥 Medical Conditions: {conditions}\n\
         🚨 Please take immediate action!",
        name = or_missing(user.full_name()),
        email = or_missing(user.email()),
        phone = or_missing(user.phone()),
        blood_group = or_missing(user.blood_group()),
        contact_name = or_missing(user.emergency_contact_name()),
        contact_phone = or_missing(user.emergency_contact_phone()),
        conditions = or_missing(user.medical_conditions()),
    )
}
