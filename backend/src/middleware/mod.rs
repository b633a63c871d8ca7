//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns. Today that is only
//! trace identifier propagation.

pub mod trace;

pub use trace::Trace;
