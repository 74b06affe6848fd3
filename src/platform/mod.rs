//! Platform abstraction layer
//!
//! The simulation itself is platform-free. This module only holds the
//! browser bridge that lets a JS presentation layer drive a
//! `SessionController` with JSON messages.

#[cfg(target_arch = "wasm32")]
pub mod web;
