//! Networking for the registration action.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the wire schema shared with the server, and `api` holds
//! the `RegisterAction` seam plus its HTTP implementation.

pub mod api;
pub mod types;
