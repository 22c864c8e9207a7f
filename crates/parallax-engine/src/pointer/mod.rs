//! Pointer tracking.
//!
//! Turns window-relative pointer positions into the two signed scalars that
//! steer the parallax shift, and owns the scoped listener that keeps them
//! current.

mod state;
mod tracker;

pub use state::PointerState;
pub use tracker::PointerTracker;
