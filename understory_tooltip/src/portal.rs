// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering a subtree outside its logical parent.
//!
//! Floating panels should not be clipped by the overflow or stacking context
//! of the element that owns them. A [`Portal`] pairs a subtree with the
//! container it should be mounted into; the host's [`PortalHost`] does the
//! actual mounting. [`PortalSlot`] remembers what is currently mounted so a
//! visibility flag can be turned into mount/unmount calls without leaking or
//! double-mounting.

/// Where a portal mounts its subtree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PortalTarget<N> {
    /// The host's document root (for a DOM host: `document.body`).
    #[default]
    Root,
    /// A caller-chosen container node.
    Container(N),
}

impl<N> PortalTarget<N> {
    /// The explicit container, if one was chosen.
    pub fn container(&self) -> Option<&N> {
        match self {
            Self::Root => None,
            Self::Container(node) => Some(node),
        }
    }
}

impl<N> From<Option<N>> for PortalTarget<N> {
    fn from(node: Option<N>) -> Self {
        node.map_or(Self::Root, Self::Container)
    }
}

/// A subtree destined for an alternate container.
#[derive(Clone, Debug, PartialEq)]
pub struct Portal<N, T> {
    /// Mount point.
    pub target: PortalTarget<N>,
    /// The subtree to mount.
    pub content: T,
}

impl<N, T> Portal<N, T> {
    /// Pair `content` with `target`.
    pub fn new(target: PortalTarget<N>, content: T) -> Self {
        Self { target, content }
    }

    /// Transform the subtree, keeping the target.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Portal<N, U> {
        Portal {
            target: self.target,
            content: f(self.content),
        }
    }
}

/// Host capability to mount subtrees into arbitrary containers.
pub trait PortalHost<N, T> {
    /// Handle for a mounted subtree.
    type Mounted;

    /// Mount `subtree` into `container`.
    fn mount(&mut self, subtree: T, container: &PortalTarget<N>) -> Self::Mounted;

    /// Remove a subtree previously returned by [`PortalHost::mount`].
    fn unmount(&mut self, mounted: Self::Mounted);
}

/// Tracks at most one mounted portal.
#[derive(Debug)]
pub struct PortalSlot<M> {
    mounted: Option<M>,
}

impl<M> Default for PortalSlot<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> PortalSlot<M> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self { mounted: None }
    }

    /// Returns `true` while something is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// The handle of the mounted subtree.
    pub fn mounted(&self) -> Option<&M> {
        self.mounted.as_ref()
    }

    /// Mount `portal` if nothing is mounted, or unmount when `portal` is `None`.
    ///
    /// A slot that is already mounted keeps its subtree; hosts update mounted
    /// content through their own handle.
    pub fn sync<N, T, H>(&mut self, host: &mut H, portal: Option<Portal<N, T>>)
    where
        H: PortalHost<N, T, Mounted = M> + ?Sized,
    {
        match (portal, self.mounted.is_some()) {
            (Some(portal), false) => {
                self.mounted = Some(host.mount(portal.content, &portal.target));
            }
            (None, true) => self.clear::<N, T, H>(host),
            _ => {}
        }
    }

    /// Unmount whatever is mounted.
    pub fn clear<N, T, H>(&mut self, host: &mut H)
    where
        H: PortalHost<N, T, Mounted = M> + ?Sized,
    {
        if let Some(mounted) = self.mounted.take() {
            host.unmount(mounted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Layers {
        mounted: Vec<(usize, Option<u32>, &'static str)>,
        next: usize,
    }

    impl PortalHost<u32, &'static str> for Layers {
        type Mounted = usize;

        fn mount(&mut self, subtree: &'static str, container: &PortalTarget<u32>) -> usize {
            let id = self.next;
            self.next += 1;
            self.mounted.push((id, container.container().copied(), subtree));
            id
        }

        fn unmount(&mut self, mounted: usize) {
            self.mounted.retain(|(id, ..)| *id != mounted);
        }
    }

    #[test]
    fn default_target_is_root() {
        let target: PortalTarget<u32> = PortalTarget::default();
        assert_eq!(target, PortalTarget::Root);
        assert_eq!(PortalTarget::from(Some(7_u32)), PortalTarget::Container(7));
        assert_eq!(PortalTarget::<u32>::from(None), PortalTarget::Root);
    }

    #[test]
    fn sync_mounts_once_and_unmounts() {
        let mut host = Layers::default();
        let mut slot = PortalSlot::new();

        slot.sync(&mut host, Some(Portal::new(PortalTarget::Container(9_u32), "panel")));
        slot.sync(&mut host, Some(Portal::new(PortalTarget::Container(9_u32), "panel")));
        assert_eq!(host.mounted.len(), 1);
        assert_eq!(host.mounted[0].1, Some(9));

        slot.sync::<u32, &'static str, _>(&mut host, None);
        assert!(host.mounted.is_empty());
        assert!(!slot.is_mounted());
    }

    #[test]
    fn root_target_mounts_without_container() {
        let mut host = Layers::default();
        let mut slot = PortalSlot::new();
        slot.sync(&mut host, Some(Portal::new(PortalTarget::<u32>::Root, "panel")));
        assert_eq!(host.mounted[0].1, None);
        assert_eq!(slot.mounted(), Some(&0));
    }
}
