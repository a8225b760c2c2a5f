// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Escape-to-dismiss.
//!
//! [`KeydownHub`] is the single-threaded, process-wide list of keydown
//! listeners (the equivalent of a window-level listener in a DOM host). The
//! host feeds it key-down events; listeners are plain closures.
//!
//! [`EscapeWatcher`] keeps at most one listener registered on the hub, and
//! only while its owner is open:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use ui_events::keyboard::{Key, NamedKey};
//! use understory_tooltip::escape::{EscapeWatcher, KeydownHub};
//!
//! let hub = KeydownHub::new();
//! let mut watcher = EscapeWatcher::new();
//! let closed_at = Rc::new(Cell::new(None));
//!
//! let sink = closed_at.clone();
//! watcher.sync(true, &hub, move || move |now: u64| sink.set(Some(now)));
//! assert_eq!(hub.len(), 1);
//!
//! hub.dispatch_key(&Key::Named(NamedKey::Escape), 42);
//! assert_eq!(closed_at.get(), Some(42));
//!
//! watcher.sync(false, &hub, || |_: u64| {});
//! assert!(hub.is_empty());
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use ui_events::keyboard::{Key, KeyboardEvent, NamedKey};

type Listener = Rc<dyn Fn(&Key, u64)>;

/// Handle for a listener registered on a [`KeydownHub`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

#[derive(Default)]
struct HubInner {
    next: u64,
    listeners: Vec<(ListenerKey, Listener)>,
}

/// Shared list of keydown listeners.
///
/// Cloning the hub clones the handle, not the list.
#[derive(Clone, Default)]
pub struct KeydownHub {
    inner: Rc<RefCell<HubInner>>,
}

impl fmt::Debug for KeydownHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeydownHub")
            .field("listeners", &self.len())
            .finish_non_exhaustive()
    }
}

impl KeydownHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a listener. It receives the pressed key and the event timestamp.
    pub fn add_listener(&self, listener: impl Fn(&Key, u64) + 'static) -> ListenerKey {
        let mut inner = self.inner.borrow_mut();
        let key = ListenerKey(inner.next);
        inner.next += 1;
        inner.listeners.push((key, Rc::new(listener)));
        key
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, key: ListenerKey) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(k, _)| *k != key);
        inner.listeners.len() != before
    }

    fn is_registered(&self, key: ListenerKey) -> bool {
        self.inner.borrow().listeners.iter().any(|(k, _)| *k == key)
    }

    /// Deliver a key-down to every listener, in registration order.
    ///
    /// Listeners may add or remove listeners (including themselves) while
    /// the event is delivered. A listener removed during delivery is not
    /// called afterwards; one added during delivery first sees the next event.
    pub fn dispatch_key(&self, key: &Key, now: u64) {
        let snapshot: Vec<(ListenerKey, Listener)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(k, l)| (*k, l.clone()))
            .collect();
        for (k, listener) in snapshot {
            if self.is_registered(k) {
                listener(key, now);
            }
        }
    }

    /// Deliver a keyboard event. Key-up events are ignored.
    pub fn dispatch(&self, event: &KeyboardEvent, now: u64) {
        if event.state.is_down() {
            self.dispatch_key(&event.key, now);
        }
    }
}

/// Returns `true` for the Escape key.
pub fn is_escape(key: &Key) -> bool {
    matches!(key, Key::Named(NamedKey::Escape))
}

/// Keeps one Escape listener registered while its owner is open.
#[derive(Debug, Default)]
pub struct EscapeWatcher {
    registered: Option<ListenerKey>,
}

impl EscapeWatcher {
    /// Create a watcher with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a listener is registered.
    pub fn is_listening(&self) -> bool {
        self.registered.is_some()
    }

    /// Register or unregister to match `open`.
    ///
    /// `make_handler` is only called when a registration actually happens;
    /// the handler it returns runs with the event timestamp on Escape.
    pub fn sync<M, F>(&mut self, open: bool, hub: &KeydownHub, make_handler: M)
    where
        M: FnOnce() -> F,
        F: Fn(u64) + 'static,
    {
        match (open, self.registered) {
            (true, None) => {
                let handler = make_handler();
                let key = hub.add_listener(move |key, now| {
                    if is_escape(key) {
                        handler(now);
                    }
                });
                #[cfg(feature = "tracing")]
                tracing::debug!(listener = key.0, "escape listener registered");
                self.registered = Some(key);
            }
            (false, Some(_)) => self.release(hub),
            _ => {}
        }
    }

    /// Unregister unconditionally.
    pub fn release(&mut self, hub: &KeydownHub) {
        if let Some(key) = self.registered.take() {
            hub.remove_listener(key);
            #[cfg(feature = "tracing")]
            tracing::debug!(listener = key.0, "escape listener removed");
        }
    }
}
