//! Kola Market Core - Shared types library.
//!
//! This crate provides common types used across all Kola Market components:
//! - `storefront` - Public-facing shop (auth, addresses, cart, checkout)
//! - `admin` - Internal sales dashboard
//! - `docstore` - Hosted document-database gateway
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no store
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses
//! - [`models`] - Document models stored in the backend collections
//! - [`lenient`] - Tolerant deserializers for loosely-typed backend fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod lenient;
pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
