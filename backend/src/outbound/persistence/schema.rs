//! Diesel table definitions for the directory store.
//!
//! The tables are owned by the HR system; this service only reads them.
//! Keep these definitions in step with the live schema (`diesel
//! print-schema` can regenerate them).

diesel::table! {
    /// Employee records.
    users (user_id) {
        user_id -> Int4,
        full_name -> Varchar,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        blood_group -> Nullable<Varchar>,
        emergency_contact_name -> Nullable<Varchar>,
        emergency_contact_phone -> Nullable<Varchar>,
        medical_conditions -> Nullable<Text>,
        allergies -> Nullable<Text>,
        /// Opaque QR payload used by the badge printer. Never read here.
        qr_code -> Nullable<Text>,
    }
}

diesel::table! {
    /// Administrators who receive SOS broadcasts.
    admins (admin_id) {
        admin_id -> Int4,
        full_name -> Varchar,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        role -> Nullable<Varchar>,
        /// Credential hash for the admin console. Never read here.
        password -> Nullable<Varchar>,
    }
}
