//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types. The
//! runtime translates platform events into `InputEvent`s and forwards them
//! to the app. Pointer moves can also be
//! observed through scoped `PointerListeners` subscriptions.

mod listeners;
pub(crate) mod platform;
mod types;

pub use listeners::{ListenerGuard, PointerListeners};
pub use types::{InputEvent, Key, KeyState, PointerMoveEvent};
