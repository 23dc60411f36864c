//! Advisory session preferences persisted outside the entity store.
//!
//! # Responsibility
//! - Remember small UI-affecting options (the last viewed category).
//! - Degrade to "no prior state" on missing or malformed records.
//!
//! # Invariants
//! - The record lives in its own file; it never shares a failure domain
//!   with the entity database.
//! - Saves replace the whole record atomically.
//! - Referenced ids are not validated here; stale ids are the caller's
//!   concern.

mod options;
mod state;

pub use options::{SessionOptions, LAST_CATEGORY_ID_KEY};
pub use state::{SessionError, SessionState};
