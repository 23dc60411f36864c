//! Core use-case services.
//!
//! # Responsibility
//! - Expose the entity store facade to shells.
//! - Reconcile advisory session state with live entity data.

pub mod startup;
pub mod store;
