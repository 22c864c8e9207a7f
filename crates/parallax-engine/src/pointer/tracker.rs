use std::cell::Cell;
use std::rc::Rc;

use crate::input::{ListenerGuard, PointerListeners};

use super::PointerState;

#[derive(Default)]
struct Shared {
    state: Cell<PointerState>,
    dirty: Cell<bool>,
}

/// Keeps a [`PointerState`] in sync with pointer movement.
///
/// Mounting registers one listener; the listener is the only writer of the
/// state. Dropping the tracker (or calling [`unmount`](Self::unmount))
/// removes the listener again.
pub struct PointerTracker {
    shared: Rc<Shared>,
    _guard: ListenerGuard,
}

impl PointerTracker {
    pub fn mount(listeners: &PointerListeners) -> Self {
        let shared = Rc::new(Shared::default());

        let writer = Rc::clone(&shared);
        let guard = listeners.subscribe(move |event, viewport| {
            let Some(next) = PointerState::from_client(event.x, event.y, viewport) else {
                return;
            };
            if writer.state.replace(next) != next {
                writer.dirty.set(true);
            }
        });

        Self { shared, _guard: guard }
    }

    /// Current state; `PointerState::CENTER` until the first move.
    pub fn state(&self) -> PointerState {
        self.shared.state.get()
    }

    /// Whether the state changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.get()
    }

    /// Returns and clears the change flag. Called once per rendered frame.
    pub fn take_dirty(&self) -> bool {
        self.shared.dirty.replace(false)
    }

    pub fn unmount(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::input::PointerMoveEvent;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn move_to(listeners: &PointerListeners, x: f32, y: f32) {
        listeners.dispatch(&PointerMoveEvent { x, y }, VP);
    }

    #[test]
    fn starts_centered_and_clean() {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);
        assert_eq!(tracker.state(), PointerState::CENTER);
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn move_to_origin_gives_minus_one() {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);
        move_to(&listeners, 0.0, 0.0);
        assert_eq!(tracker.state(), PointerState { x_angle: -1.0, y_angle: -1.0 });
        assert!(tracker.take_dirty());
        assert!(!tracker.take_dirty());
    }

    #[test]
    fn move_to_centre_gives_zero() {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);
        move_to(&listeners, 100.0, 100.0);
        tracker.take_dirty();
        move_to(&listeners, 400.0, 300.0);
        assert_eq!(tracker.state(), PointerState::CENTER);
        assert!(tracker.is_dirty());
    }

    #[test]
    fn unchanged_position_does_not_mark_dirty() {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);
        move_to(&listeners, 400.0, 300.0);
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn mount_then_unmount_leaves_no_listener() {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);
        assert_eq!(listeners.len(), 1);
        tracker.unmount();
        assert!(listeners.is_empty());
    }

    #[test]
    fn unmount_on_unwind_leaves_no_listener() {
        let listeners = PointerListeners::new();
        let probe = listeners.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _tracker = PointerTracker::mount(&listeners);
            assert_eq!(listeners.len(), 1);
            panic!("setup failed after mount");
        }));
        assert!(result.is_err());
        assert!(probe.is_empty());
    }

    #[test]
    fn degenerate_viewport_keeps_last_state() {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);
        move_to(&listeners, 0.0, 0.0);
        listeners.dispatch(&PointerMoveEvent { x: 5.0, y: 5.0 }, Viewport::new(0.0, 0.0));
        assert_eq!(tracker.state(), PointerState { x_angle: -1.0, y_angle: -1.0 });
    }
}
