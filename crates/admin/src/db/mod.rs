//! Read-side repositories over the document store.
//!
//! The dashboard only ever reads orders; the one write path is the
//! settings singleton.

pub mod orders;
pub mod settings;
