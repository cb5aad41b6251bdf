//! # IO Module
//!
//! Capability seams between the engine and its host.
//!
//! The engine never recognizes gestures or positions overlays itself. It
//! consumes a normalized gesture delta stream ([`GestureSource`]) and talks
//! to whatever presents the time sub-picker through [`OverlayController`].
//! Both are plain traits so tests can drive them with synthetic input.

pub mod gesture;
pub mod overlay;

pub use gesture::*;
pub use overlay::*;
