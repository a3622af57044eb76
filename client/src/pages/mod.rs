//! Page controllers.
//!
//! DESIGN
//! ======
//! A page owns its transient UI flags (pending, field errors, checkboxes)
//! and drives the shared store through its mutators. Rendering stays with
//! whatever UI layer embeds the controller.

pub mod register;
pub mod validation;
