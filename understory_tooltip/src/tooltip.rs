// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tooltip component: controller, anchor, escape watcher and panel
//! description wired together.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::arrow::arrow_style;
use crate::config::{DEFAULT_Z_INDEX, OpenChangeCallback, TooltipConfig};
use crate::controller::{Interaction, OpenMode, OpenStateController};
use crate::escape::{EscapeWatcher, KeydownHub};
use crate::floating::{Anchor, FloatingLayout, FloatingResolver};
use crate::id::TooltipId;
use crate::panel::{
    ARROW_CLASS, ArrowProps, CONTENT_CLASS, Content, PANEL_CLASS, PanelHandlers, PanelProps,
    PanelStyle, ROLE, class_list,
};
use crate::placement::Placement;
use crate::portal::{Portal, PortalTarget};
use crate::trigger::{Element, Handler, NodeRef, Trigger, TriggerAdapter, TriggerEvent};

struct Shared<N> {
    controller: RefCell<OpenStateController>,
    anchor: RefCell<Anchor<N>>,
    escape: RefCell<EscapeWatcher>,
    keyboard: KeydownHub,
    on_open_change: RefCell<Option<OpenChangeCallback>>,
    pending: RefCell<VecDeque<bool>>,
    notifying: Cell<bool>,
}

fn dispatch<N: 'static>(shared: &Rc<Shared<N>>, interaction: Interaction, now: u64) {
    let change = shared.controller.borrow_mut().handle(interaction, now);
    settle(shared, change);
}

/// Report a change, then align the escape listener. A controlled owner
/// usually writes its flag from the callback, so the listener follows the
/// state the callback leaves behind.
fn settle<N: 'static>(shared: &Rc<Shared<N>>, change: Option<bool>) {
    if let Some(open) = change {
        notify(shared, open);
    }
    sync_escape(shared);
}

fn sync_escape<N: 'static>(shared: &Rc<Shared<N>>) {
    let open = {
        let controller = shared.controller.borrow();
        controller.is_open() && !controller.is_torn_down()
    };
    let weak = Rc::downgrade(shared);
    shared.escape.borrow_mut().sync(open, &shared.keyboard, move || {
        move |now: u64| {
            if let Some(shared) = weak.upgrade() {
                dispatch(&shared, Interaction::Escape, now);
            }
        }
    });
}

/// Deliver `open` to the callback. Changes raised from inside the callback
/// are queued and delivered in order once it returns.
fn notify<N>(shared: &Rc<Shared<N>>, open: bool) {
    shared.pending.borrow_mut().push_back(open);
    if shared.notifying.replace(true) {
        return;
    }
    loop {
        let Some(open) = shared.pending.borrow_mut().pop_front() else {
            break;
        };
        if let Some(callback) = shared.on_open_change.borrow_mut().as_mut() {
            callback(open);
        }
    }
    shared.notifying.set(false);
}

fn interaction_handler<N: 'static>(weak: Weak<Shared<N>>, interaction: Interaction) -> Handler {
    Box::new(move |now| {
        if let Some(shared) = weak.upgrade() {
            dispatch(&shared, interaction, now);
        }
    })
}

/// A tooltip instance.
///
/// `N` is the host's node handle, `C` its content subtree type. All methods
/// take `&self`: the handlers installed on the trigger and panel call back
/// into the same shared state.
///
/// ```
/// use understory_tooltip::{Content, Tooltip, TooltipConfig};
/// use understory_tooltip::controller::Interaction;
/// use understory_tooltip::escape::KeydownHub;
/// use understory_tooltip::trigger::TriggerEvent;
///
/// let keyboard = KeydownHub::new();
/// let tooltip: Tooltip<u32, ()> =
///     Tooltip::new(TooltipConfig::new(), Content::from("Save"), &keyboard);
///
/// let mut trigger = tooltip.trigger("💾");
/// assert_eq!(trigger.described_by.as_deref(), Some(tooltip.id().as_str()));
///
/// trigger.dispatch(TriggerEvent::PointerEnter, 0);
/// assert!(tooltip.panel().is_none());
/// tooltip.advance(300);
/// let panel = tooltip.panel().unwrap();
/// assert_eq!(panel.content.role, "tooltip");
/// ```
pub struct Tooltip<N: Clone + 'static, C> {
    shared: Rc<Shared<N>>,
    id: TooltipId,
    adapter: TriggerAdapter<N>,
    content: Content<C>,
    placement: Placement,
    z_index: i32,
    interactive: bool,
    arrow_size: Option<f64>,
    content_class: String,
    arrow_class: String,
    attributes: Vec<(String, String)>,
    portal_container: PortalTarget<N>,
}

impl<N: Clone + fmt::Debug + 'static, C: fmt::Debug> fmt::Debug for Tooltip<N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tooltip")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .field("content", &self.content)
            .field("placement", &self.placement)
            .finish_non_exhaustive()
    }
}

impl<N: Clone + 'static, C> Tooltip<N, C> {
    /// Create a tooltip listening for Escape on `keyboard`.
    pub fn new(config: TooltipConfig<N>, content: Content<C>, keyboard: &KeydownHub) -> Self {
        let floating = config.floating_options();
        let delays = config.hover_delays();
        let TooltipConfig {
            placement,
            z_index,
            open,
            disable_interactive,
            on_open_change,
            portal_container,
            arrow,
            arrow_size,
            class_name,
            arrow_class_name,
            attributes,
            ..
        } = config;

        let controller = OpenStateController::new(OpenMode::from(open), delays)
            .with_interactive(!disable_interactive);
        let shared = Rc::new(Shared {
            controller: RefCell::new(controller),
            anchor: RefCell::new(Anchor::new(floating)),
            escape: RefCell::new(EscapeWatcher::new()),
            keyboard: keyboard.clone(),
            on_open_change: RefCell::new(on_open_change),
            pending: RefCell::new(VecDeque::new()),
            notifying: Cell::new(false),
        });

        let id = TooltipId::next();
        let register = Rc::downgrade(&shared);
        let intents = Rc::downgrade(&shared);
        let adapter = TriggerAdapter::new(
            id.as_str(),
            move |node| {
                if let Some(shared) = register.upgrade() {
                    shared.anchor.borrow_mut().set_reference(node);
                }
            },
            move |event, now| {
                let interaction = match event {
                    TriggerEvent::PointerEnter => Interaction::TriggerPointerEnter,
                    TriggerEvent::PointerLeave => Interaction::TriggerPointerLeave,
                    TriggerEvent::Focus => Interaction::TriggerFocus,
                    TriggerEvent::Blur => Interaction::TriggerBlur,
                };
                if let Some(shared) = intents.upgrade() {
                    dispatch(&shared, interaction, now);
                }
            },
        );

        // Controlled tooltips may start open.
        sync_escape(&shared);

        Self {
            shared,
            id,
            adapter,
            content,
            placement,
            z_index,
            interactive: !disable_interactive,
            arrow_size: arrow.then_some(arrow_size),
            content_class: class_list(CONTENT_CLASS, &class_name),
            arrow_class: class_list(ARROW_CLASS, &arrow_class_name),
            attributes,
            portal_container,
        }
    }

    /// Identity shared by the trigger and the panel.
    pub fn id(&self) -> &TooltipId {
        &self.id
    }

    /// Effective open state.
    ///
    /// Also picks up a controlled flag written directly by its owner, so the
    /// escape listener is registered or removed to match.
    pub fn is_open(&self) -> bool {
        sync_escape(&self.shared);
        self.shared.controller.borrow().is_open()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.shared.controller.borrow().next_deadline()
    }

    /// Feed an interaction directly.
    pub fn handle(&self, interaction: Interaction, now: u64) {
        dispatch(&self.shared, interaction, now);
    }

    /// Fire due timers.
    pub fn advance(&self, now: u64) {
        let change = self.shared.controller.borrow_mut().advance(now);
        settle(&self.shared, change);
    }

    /// Adapt a trigger so it drives this tooltip.
    pub fn trigger(&self, trigger: impl Into<Trigger<N>>) -> Element<N> {
        self.adapter.adapt(trigger)
    }

    /// The tooltip body.
    pub fn content(&self) -> &Content<C> {
        &self.content
    }

    /// Replace the tooltip body.
    pub fn set_content(&mut self, content: Content<C>) {
        self.content = content;
    }

    /// Re-resolve the panel position. Call when either node attaches or
    /// detaches and whenever the resolver reports a geometry change.
    pub fn update_position<R>(&self, resolver: &mut R) -> Option<FloatingLayout>
    where
        R: FloatingResolver<N> + ?Sized,
    {
        self.shared.anchor.borrow_mut().sync(resolver).copied()
    }

    /// Close the resolver subscription, if any.
    pub fn release_position<R>(&self, resolver: &mut R)
    where
        R: FloatingResolver<N> + ?Sized,
    {
        self.shared.anchor.borrow_mut().release(resolver);
    }

    /// The last resolved layout.
    pub fn layout(&self) -> Option<FloatingLayout> {
        self.shared.anchor.borrow().layout().copied()
    }

    /// Stacking order of the panel. Zero falls back to [`DEFAULT_Z_INDEX`].
    pub fn z_index(&self) -> i32 {
        if self.z_index == 0 {
            DEFAULT_Z_INDEX
        } else {
            self.z_index
        }
    }

    /// The panel to mount, or `None` while closed or without content.
    pub fn panel(&self) -> Option<Portal<N, PanelProps<'_, N, C>>> {
        if !self.is_open() || self.content.is_empty() {
            return None;
        }
        let layout = self.layout();
        let placement = layout.map_or(self.placement, |l| l.placement);
        let style = match layout {
            Some(l) => PanelStyle::new(Some(self.z_index())).with_floating(l.styles),
            None => PanelStyle::new(Some(self.z_index())),
        };
        let arrow = self.arrow_size.map(|size| ArrowProps {
            class_name: self.arrow_class.clone(),
            size,
            style: arrow_style(placement, layout.and_then(|l| l.arrow), size),
        });
        let handlers = self.interactive.then(|| PanelHandlers {
            pointer_enter: interaction_handler(
                Rc::downgrade(&self.shared),
                Interaction::PanelPointerEnter,
            ),
            pointer_leave: interaction_handler(
                Rc::downgrade(&self.shared),
                Interaction::PanelPointerLeave,
            ),
        });
        let floating = Rc::downgrade(&self.shared);
        let node_ref = NodeRef::Callback(Box::new(move |node: Option<N>| {
            if let Some(shared) = floating.upgrade() {
                shared.anchor.borrow_mut().set_floating(node);
            }
        }));

        Some(Portal::new(
            self.portal_container.clone(),
            PanelProps {
                id: self.id.as_str(),
                role: ROLE,
                class_name: PANEL_CLASS,
                content_class: self.content_class.clone(),
                style,
                placement,
                content: &self.content,
                attributes: &self.attributes,
                node_ref,
                handlers,
                arrow,
            },
        ))
    }

    /// Cancel timers and unregister the escape listener. Idempotent.
    pub fn teardown(&self) {
        self.shared.controller.borrow_mut().teardown();
        self.shared
            .escape
            .borrow_mut()
            .release(&self.shared.keyboard);
        #[cfg(feature = "tracing")]
        tracing::debug!(id = %self.id, "tooltip torn down");
    }
}

impl<N: Clone + 'static, C> Drop for Tooltip<N, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrow::ArrowAnchor;
    use crate::controller::ControlledOpen;
    use crate::floating::testing::FixedResolver;
    use kurbo::Point;
    use ui_events::keyboard::{Key, NamedKey};

    fn escape(hub: &KeydownHub, now: u64) {
        hub.dispatch_key(&Key::Named(NamedKey::Escape), now);
    }

    #[test]
    fn escape_listener_follows_open_state() {
        let hub = KeydownHub::new();
        let t: Tooltip<u32, ()> = Tooltip::new(TooltipConfig::new(), "tip".into(), &hub);
        assert!(hub.is_empty());

        t.handle(Interaction::TriggerFocus, 0);
        assert_eq!(hub.len(), 1);

        escape(&hub, 5);
        assert!(!t.is_open());
        assert!(hub.is_empty());
    }

    #[test]
    fn teardown_unregisters_and_cancels() {
        let hub = KeydownHub::new();
        let t: Tooltip<u32, ()> = Tooltip::new(TooltipConfig::new(), "tip".into(), &hub);
        t.handle(Interaction::TriggerFocus, 0);
        t.handle(Interaction::TriggerPointerLeave, 1);
        assert!(t.next_deadline().is_some());

        drop(t);
        assert!(hub.is_empty());
    }

    #[test]
    fn panel_uses_resolved_layout() {
        let hub = KeydownHub::new();
        let t: Tooltip<u32, ()> = Tooltip::new(
            TooltipConfig::new().arrow(true).arrow_size(10.0).class_name("dark"),
            "tip".into(),
            &hub,
        );
        let mut trigger = t.trigger("?");
        trigger.attach(1);
        t.handle(Interaction::TriggerFocus, 0);

        let mut panel = t.panel().unwrap();
        assert_eq!(panel.content.placement, Placement::Top);
        assert_eq!(panel.content.style.origin, Point::ZERO);
        panel.content.node_ref.set(Some(2));
        drop(panel);

        let mut resolver = FixedResolver {
            placement: Some(Placement::Bottom),
            origin: Point::new(20.0, 40.0),
            arrow: Some(ArrowAnchor::x(15.0)),
            ..FixedResolver::default()
        };
        assert!(t.update_position(&mut resolver).is_some());
        assert!(resolver.resolves[0].2.offset > 4.0);

        let panel = t.panel().unwrap();
        let props = &panel.content;
        assert_eq!(props.placement, Placement::Bottom);
        assert_eq!(props.style.origin, Point::new(20.0, 40.0));
        assert_eq!(props.content_class, "headless-tooltip dark");
        let arrow = props.arrow.as_ref().unwrap();
        assert_eq!(arrow.size, 10.0);
        assert_eq!(arrow.style.left, Some(15.0));
        assert_eq!(arrow.style.top, Some(-5.0));
    }

    #[test]
    fn callback_may_reenter() {
        let hub = KeydownHub::new();
        let seen: Rc<RefCell<Vec<bool>>> = Rc::default();
        let sink = seen.clone();
        let slot: Rc<RefCell<Option<Rc<Tooltip<u32, ()>>>>> = Rc::default();
        let weak_slot = Rc::downgrade(&slot);
        let t = Rc::new(Tooltip::new(
            TooltipConfig::new().on_open_change(move |open| {
                sink.borrow_mut().push(open);
                // Close again from inside the callback.
                if open {
                    if let Some(slot) = weak_slot.upgrade() {
                        if let Some(t) = slot.borrow().as_ref() {
                            t.handle(Interaction::TriggerBlur, 1);
                        }
                    }
                }
            }),
            Content::from("tip"),
            &hub,
        ));
        *slot.borrow_mut() = Some(t.clone());

        t.handle(Interaction::TriggerFocus, 0);
        assert_eq!(*seen.borrow(), [true, false]);
        assert!(!t.is_open());
        slot.borrow_mut().take();
    }

    #[test]
    fn controlled_owner_mirroring_callback_tracks_escape() {
        let hub = KeydownHub::new();
        let owner = ControlledOpen::new(false);
        let flag = owner.clone();
        let t: Tooltip<u32, ()> = Tooltip::new(
            TooltipConfig::new()
                .controlled(owner.clone())
                .on_open_change(move |o| flag.set(o)),
            "tip".into(),
            &hub,
        );

        t.handle(Interaction::TriggerFocus, 0);
        assert!(owner.get());
        assert_eq!(hub.len(), 1);

        escape(&hub, 10);
        assert!(!owner.get());
        assert!(!t.is_open());
        assert!(hub.is_empty());
    }

    #[test]
    fn direct_owner_write_is_picked_up_on_render() {
        let hub = KeydownHub::new();
        let open = ControlledOpen::new(false);
        let t: Tooltip<u32, ()> =
            Tooltip::new(TooltipConfig::new().controlled(open.clone()), "tip".into(), &hub);
        open.set(true);
        assert!(t.panel().is_some());
        assert_eq!(hub.len(), 1);
        open.set(false);
        assert!(t.panel().is_none());
        assert!(hub.is_empty());
    }

    #[test]
    fn zero_z_index_falls_back_to_default() {
        let hub = KeydownHub::new();
        let t: Tooltip<u32, ()> = Tooltip::new(
            TooltipConfig::new()
                .controlled(ControlledOpen::new(true))
                .z_index(0),
            "tip".into(),
            &hub,
        );
        assert_eq!(t.z_index(), DEFAULT_Z_INDEX);
        let panel = t.panel().unwrap();
        assert_eq!(panel.content.style.z_index, Some(50));

        let t: Tooltip<u32, ()> = Tooltip::new(
            TooltipConfig::new()
                .controlled(ControlledOpen::new(true))
                .z_index(-3),
            "tip".into(),
            &hub,
        );
        assert_eq!(t.z_index(), -3);
    }
}
