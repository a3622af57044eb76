//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and talk to the identity backend so
//! route handlers can stay focused on protocol translation.

pub mod registration;
