use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use crate::coords::Viewport;

use super::types::PointerMoveEvent;

type Callback = Box<dyn FnMut(&PointerMoveEvent, Viewport)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
    /// Ids unsubscribed while their callback was checked out for dispatch.
    removed_during_dispatch: HashSet<u64>,
}

/// Window-wide pointer-move event source.
///
/// Cloning yields another handle to the same registry. Everything runs on
/// the event-loop thread, so the registry is `Rc`-shared and not `Send`.
#[derive(Clone, Default)]
pub struct PointerListeners {
    inner: Rc<RefCell<Registry>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` for every subsequent pointer move.
    ///
    /// The listener stays registered exactly as long as the returned guard
    /// lives.
    #[must_use = "dropping the guard immediately unregisters the listener"]
    pub fn subscribe<F>(&self, f: F) -> ListenerGuard
    where
        F: FnMut(&PointerMoveEvent, Viewport) + 'static,
    {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.entries.push((id, Box::new(f)));
        log::debug!("pointer listener {id} registered");

        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Delivers `event` to every registered listener in registration order.
    ///
    /// Listeners may subscribe or drop guards from inside the callback; such
    /// changes apply from the next dispatch on.
    pub fn dispatch(&self, event: &PointerMoveEvent, viewport: Viewport) {
        let mut active = std::mem::take(&mut self.inner.borrow_mut().entries);

        for (_, callback) in active.iter_mut() {
            callback(event, viewport);
        }

        let unsubscribed = {
            let mut reg = self.inner.borrow_mut();
            let removed = std::mem::take(&mut reg.removed_during_dispatch);
            let (unsubscribed, mut kept): (Vec<_>, Vec<_>) =
                active.into_iter().partition(|(id, _)| removed.contains(id));
            kept.append(&mut reg.entries);
            reg.entries = kept;
            unsubscribed
        };
        // Callbacks may own guards of their own; those re-borrow the registry.
        drop(unsubscribed);
    }

    /// Number of currently registered listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scoped registration returned by [`PointerListeners::subscribe`].
///
/// Dropping it unregisters the listener on every exit path, including
/// unwinding.
pub struct ListenerGuard {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else { return };
        let removed = {
            let Ok(mut reg) = registry.try_borrow_mut() else {
                log::warn!("pointer listener {} dropped while registry is borrowed", self.id);
                return;
            };
            match reg.entries.iter().position(|(id, _)| *id == self.id) {
                Some(index) => Some(reg.entries.remove(index)),
                None => {
                    // Checked out by a running dispatch.
                    reg.removed_during_dispatch.insert(self.id);
                    None
                }
            }
        };
        log::debug!("pointer listener {} unregistered", self.id);

        // Released only after the borrow ends, for callbacks owning guards.
        drop(removed);
    }
}
