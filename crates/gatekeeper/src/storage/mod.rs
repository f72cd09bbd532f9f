//! Storage traits for revocation data.
//!
//! The core never persists anything itself. Revoked-session records live in
//! an external [`TokenStore`] the host injects at construction; the core
//! queries and appends to it as an opaque capability and never iterates or
//! owns its contents.
//!
//! # Implementations
//!
//! A reference in-memory backend is provided in a separate crate:
//!
//! - `gatekeeper-store-memory` - process-local deny list for tests and
//!   single-process hosts

pub mod deny_list;

pub use deny_list::TokenStore;
