//! # client
//!
//! Client-side half of the registration flow: the application store, the
//! registration page controller with its form validation, and the HTTP
//! binding to the server's registration action.
//!
//! The crate holds no rendering code. A UI layer binds its inputs to
//! [`pages::register::RegistrationPage`] and reads [`state::Store`]
//! snapshots to render.

pub mod net;
pub mod pages;
pub mod state;
