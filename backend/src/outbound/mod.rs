//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL directory store read through Diesel.
//! - **mail**: SMTP relay transport built on `lettre`.
//!
//! Adapters only translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod mail;
pub mod persistence;
