// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger adaptation.
//!
//! A trigger is whatever the caller renders as the thing the tooltip
//! describes. [`TriggerAdapter::adapt`] turns it into a single [`Element`]
//! that
//!
//! - points at the panel through `described_by`,
//! - registers its node with the positioning anchor when attached,
//! - forwards pointer and focus events to the tooltip after the caller's own
//!   handlers,
//! - is keyboard focusable.
//!
//! Non-element triggers (plain text, fragments) are wrapped in a `span`.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// Event handler receiving the event timestamp.
pub type Handler = Box<dyn FnMut(u64)>;

/// Compose two handlers: `first` runs, then `then`.
pub fn chain(first: Option<Handler>, mut then: Handler) -> Handler {
    match first {
        Some(mut first) => Box::new(move |now| {
            first(now);
            then(now);
        }),
        None => then,
    }
}

/// A settable reference to a host node.
pub enum NodeRef<N> {
    /// Called with `Some(node)` on attach and `None` on detach.
    Callback(Box<dyn FnMut(Option<N>)>),
    /// Shared slot written on attach and cleared on detach.
    Slot(Rc<RefCell<Option<N>>>),
}

impl<N> NodeRef<N> {
    /// Create a slot reference and return the slot alongside it.
    pub fn slot() -> (Self, Rc<RefCell<Option<N>>>) {
        let slot = Rc::new(RefCell::new(None));
        (Self::Slot(slot.clone()), slot)
    }

    /// Store or clear the node.
    pub fn set(&mut self, node: Option<N>) {
        match self {
            Self::Callback(f) => f(node),
            Self::Slot(slot) => *slot.borrow_mut() = node,
        }
    }
}

impl<N> fmt::Debug for NodeRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("NodeRef::Callback"),
            Self::Slot(_) => f.write_str("NodeRef::Slot"),
        }
    }
}

/// The events a trigger forwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// Pointer entered.
    PointerEnter,
    /// Pointer left.
    PointerLeave,
    /// Focus gained.
    Focus,
    /// Focus lost.
    Blur,
}

impl TriggerEvent {
    /// All events.
    pub const ALL: [Self; 4] = [Self::PointerEnter, Self::PointerLeave, Self::Focus, Self::Blur];
}

/// Per-event handler slots of an element.
#[derive(Default)]
pub struct TriggerHandlers {
    /// Pointer enter.
    pub pointer_enter: Option<Handler>,
    /// Pointer leave.
    pub pointer_leave: Option<Handler>,
    /// Focus.
    pub focus: Option<Handler>,
    /// Blur.
    pub blur: Option<Handler>,
}

impl TriggerHandlers {
    /// The slot for `event`.
    pub fn slot_mut(&mut self, event: TriggerEvent) -> &mut Option<Handler> {
        match event {
            TriggerEvent::PointerEnter => &mut self.pointer_enter,
            TriggerEvent::PointerLeave => &mut self.pointer_leave,
            TriggerEvent::Focus => &mut self.focus,
            TriggerEvent::Blur => &mut self.blur,
        }
    }
}

impl fmt::Debug for TriggerHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerHandlers")
            .field("pointer_enter", &self.pointer_enter.is_some())
            .field("pointer_leave", &self.pointer_leave.is_some())
            .field("focus", &self.focus.is_some())
            .field("blur", &self.blur.is_some())
            .finish()
    }
}

/// A host element description.
#[derive(Debug)]
pub struct Element<N> {
    /// Tag name.
    pub tag: Cow<'static, str>,
    /// Reference slot for the mounted node.
    pub node_ref: Option<NodeRef<N>>,
    /// Event handlers.
    pub handlers: TriggerHandlers,
    /// `aria-describedby`.
    pub described_by: Option<String>,
    /// `tabindex`.
    pub tab_index: Option<i32>,
    /// Other attributes, in declaration order.
    pub attributes: Vec<(String, String)>,
    /// Children.
    pub children: Vec<Trigger<N>>,
}

impl<N> Element<N> {
    /// An element with no ref, handlers, attributes or children.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            node_ref: None,
            handlers: TriggerHandlers::default(),
            described_by: None,
            tab_index: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the reference slot.
    #[must_use]
    pub fn with_ref(mut self, node_ref: NodeRef<N>) -> Self {
        self.node_ref = Some(node_ref);
        self
    }

    /// Set the handler for `event`.
    #[must_use]
    pub fn on(mut self, event: TriggerEvent, handler: impl FnMut(u64) + 'static) -> Self {
        *self.handlers.slot_mut(event) = Some(Box::new(handler));
        self
    }

    /// Set `tabindex`.
    #[must_use]
    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Trigger<N>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The host mounted this element as `node`.
    pub fn attach(&mut self, node: N) {
        if let Some(r) = self.node_ref.as_mut() {
            r.set(Some(node));
        }
    }

    /// The host unmounted this element.
    pub fn detach(&mut self) {
        if let Some(r) = self.node_ref.as_mut() {
            r.set(None);
        }
    }

    /// Run the handler for `event`, if any.
    pub fn dispatch(&mut self, event: TriggerEvent, now: u64) {
        if let Some(h) = self.handlers.slot_mut(event).as_mut() {
            h(now);
        }
    }
}

/// Anything a caller may pass as a trigger.
#[derive(Debug)]
pub enum Trigger<N> {
    /// A single element.
    Element(Element<N>),
    /// Plain text.
    Text(String),
    /// Several siblings.
    Fragment(Vec<Trigger<N>>),
}

impl<N> From<Element<N>> for Trigger<N> {
    fn from(element: Element<N>) -> Self {
        Self::Element(element)
    }
}

impl<N> From<String> for Trigger<N> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<N> From<&str> for Trigger<N> {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

type Intent = Rc<dyn Fn(u64)>;

/// Wires triggers to a tooltip.
///
/// The adapter is reusable: every call to [`TriggerAdapter::adapt`] produces
/// an element connected to the same sinks.
pub struct TriggerAdapter<N> {
    described_by: String,
    register: Rc<dyn Fn(Option<N>)>,
    pointer_enter: Intent,
    pointer_leave: Intent,
    focus: Intent,
    blur: Intent,
}

impl<N> fmt::Debug for TriggerAdapter<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerAdapter")
            .field("described_by", &self.described_by)
            .finish_non_exhaustive()
    }
}

impl<N: Clone + 'static> TriggerAdapter<N> {
    /// Create an adapter.
    ///
    /// `register` receives the trigger node on attach and `None` on detach;
    /// `intent` receives the tooltip-side reaction to each trigger event.
    pub fn new(
        described_by: impl Into<String>,
        register: impl Fn(Option<N>) + 'static,
        intent: impl Fn(TriggerEvent, u64) + 'static,
    ) -> Self {
        let intent: Rc<dyn Fn(TriggerEvent, u64)> = Rc::new(intent);
        let bind = |event: TriggerEvent| -> Intent {
            let intent = intent.clone();
            Rc::new(move |now| intent(event, now))
        };
        Self {
            described_by: described_by.into(),
            register: Rc::new(register),
            pointer_enter: bind(TriggerEvent::PointerEnter),
            pointer_leave: bind(TriggerEvent::PointerLeave),
            focus: bind(TriggerEvent::Focus),
            blur: bind(TriggerEvent::Blur),
        }
    }

    /// The `described_by` value installed on adapted elements.
    pub fn described_by(&self) -> &str {
        &self.described_by
    }

    /// Adapt `trigger`.
    pub fn adapt(&self, trigger: impl Into<Trigger<N>>) -> Element<N> {
        let mut element = match trigger.into() {
            Trigger::Element(element) => element,
            other => Element::new("span").with_child(other),
        };

        let register = self.register.clone();
        let mut own = element.node_ref.take();
        element.node_ref = Some(NodeRef::Callback(Box::new(move |node: Option<N>| {
            register(node.clone());
            if let Some(own) = own.as_mut() {
                own.set(node);
            }
        })));

        element.described_by = Some(self.described_by.clone());

        for event in TriggerEvent::ALL {
            let intent = match event {
                TriggerEvent::PointerEnter => self.pointer_enter.clone(),
                TriggerEvent::PointerLeave => self.pointer_leave.clone(),
                TriggerEvent::Focus => self.focus.clone(),
                TriggerEvent::Blur => self.blur.clone(),
            };
            let slot = element.handlers.slot_mut(event);
            *slot = Some(chain(slot.take(), Box::new(move |now| intent(now))));
        }

        element.tab_index.get_or_insert(0);
        element
    }
}
