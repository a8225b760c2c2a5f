// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating-element positioning contract.
//!
//! This crate does not compute collision-aware positions itself. A host
//! provides a [`FloatingResolver`] (for example a binding to a flip/shift
//! positioning library, or a box-tree based solver) and [`Anchor`] keeps the
//! two node handles it needs:
//!
//! - the **reference**: the trigger the panel is attached to,
//! - the **floating** node: the panel itself.
//!
//! Nodes are referenced, never owned: `N` is whatever cheap handle the host
//! uses (a node id, an `Rc` to a DOM node, …).
//!
//! While both nodes are attached, [`Anchor::sync`] keeps a continuous-update
//! subscription open on the resolver (scroll, resize and content-size
//! changes) and re-resolves the layout. Once either node goes away the
//! subscription is released and the last layout is dropped.

use kurbo::Point;

use crate::arrow::ArrowAnchor;
use crate::placement::Placement;

/// CSS positioning strategy for the floating node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `position: absolute`.
    #[default]
    Absolute,
    /// `position: fixed`.
    Fixed,
}

impl Strategy {
    /// The CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }
}

/// Inputs handed to the resolver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatingOptions {
    /// Desired placement; the resolver may flip or shift away from it.
    pub placement: Placement,
    /// Positioning strategy.
    pub strategy: Strategy,
    /// Main-axis distance between reference and floating node, arrow included.
    pub offset: f64,
    /// Whether the resolver should compute arrow coordinates.
    pub arrow: bool,
}

impl Default for FloatingOptions {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            strategy: Strategy::Absolute,
            offset: 0.0,
            arrow: false,
        }
    }
}

/// Position patch for the floating node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FloatingStyles {
    /// Positioning strategy.
    pub strategy: Strategy,
    /// Top-left corner of the floating node, in the strategy's coordinate space.
    pub origin: Point,
}

/// What a resolver returns for one resolution pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatingLayout {
    /// The placement actually used after collision avoidance.
    pub placement: Placement,
    /// Position patch for the floating node.
    pub styles: FloatingStyles,
    /// Arrow coordinates, when requested and available.
    pub arrow: Option<ArrowAnchor>,
}

/// Handle to a continuous-update subscription on a resolver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

/// External collision-aware positioning.
pub trait FloatingResolver<N> {
    /// Compute a layout for `floating` against `reference`.
    fn resolve(&mut self, reference: &N, floating: &N, options: &FloatingOptions)
    -> FloatingLayout;

    /// Start reporting geometry changes (scroll, resize, content size) for
    /// this pair. The host reacts to those reports by calling
    /// [`Anchor::sync`] again.
    fn watch(&mut self, reference: &N, floating: &N) -> WatchId;

    /// Stop a subscription started with [`FloatingResolver::watch`].
    fn unwatch(&mut self, watch: WatchId);
}

/// Reference/floating node slots plus the resolver bookkeeping for them.
#[derive(Debug)]
pub struct Anchor<N> {
    options: FloatingOptions,
    reference: Option<N>,
    floating: Option<N>,
    watch: Option<WatchId>,
    layout: Option<FloatingLayout>,
}

impl<N> Anchor<N> {
    /// Create an anchor with no nodes attached.
    pub fn new(options: FloatingOptions) -> Self {
        Self {
            options,
            reference: None,
            floating: None,
            watch: None,
            layout: None,
        }
    }

    /// Options passed to the resolver.
    pub fn options(&self) -> &FloatingOptions {
        &self.options
    }

    /// Replace the resolver options. Takes effect on the next [`Anchor::sync`].
    pub fn set_options(&mut self, options: FloatingOptions) {
        self.options = options;
    }

    /// Set or clear the reference node.
    pub fn set_reference(&mut self, node: Option<N>) {
        self.reference = node;
    }

    /// Set or clear the floating node.
    pub fn set_floating(&mut self, node: Option<N>) {
        self.floating = node;
    }

    /// The attached reference node.
    pub fn reference(&self) -> Option<&N> {
        self.reference.as_ref()
    }

    /// The attached floating node.
    pub fn floating(&self) -> Option<&N> {
        self.floating.as_ref()
    }

    /// The most recent layout, if both nodes were attached at the last sync.
    pub fn layout(&self) -> Option<&FloatingLayout> {
        self.layout.as_ref()
    }

    /// Returns `true` while a continuous-update subscription is open.
    pub fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    /// Bring the subscription in line with the attached nodes and re-resolve.
    ///
    /// Returns the fresh layout when both nodes are attached.
    pub fn sync<R>(&mut self, resolver: &mut R) -> Option<&FloatingLayout>
    where
        R: FloatingResolver<N> + ?Sized,
    {
        match (&self.reference, &self.floating) {
            (Some(reference), Some(floating)) => {
                if self.watch.is_none() {
                    self.watch = Some(resolver.watch(reference, floating));
                }
                self.layout = Some(resolver.resolve(reference, floating, &self.options));
            }
            _ => {
                if let Some(watch) = self.watch.take() {
                    resolver.unwatch(watch);
                }
                self.layout = None;
            }
        }
        self.layout.as_ref()
    }

    /// Release the subscription, if any. Nodes stay attached.
    pub fn release<R>(&mut self, resolver: &mut R)
    where
        R: FloatingResolver<N> + ?Sized,
    {
        if let Some(watch) = self.watch.take() {
            resolver.unwatch(watch);
        }
        self.layout = None;
    }
}
