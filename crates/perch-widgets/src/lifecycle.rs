#![forbid(unsafe_code)]

//! Component lifecycle and listener ownership.
//!
//! A UI framework adapter drives each tooltip component through
//! [`Lifecycle`]: `on_create` once, `on_inputs_changed` whenever bound inputs
//! change, `on_mounted` once the component's markup is in the document, and
//! `on_destroy` when it is removed. Native listeners are acquired in
//! `on_mounted` and released in `on_destroy` through a [`ListenerSet`].

use std::time::Duration;

use perch_core::host::{Host, ListenerHandle, ListenerKind, ListenerRegistry};

/// Lifecycle hooks invoked by an adapter layer.
pub trait Lifecycle<H: Host> {
    /// Inputs delivered by `on_inputs_changed`.
    type Inputs;

    /// Called once, before the first input change.
    fn on_create(&mut self, cx: &mut H);

    /// Called whenever bound inputs change.
    fn on_inputs_changed(&mut self, inputs: Self::Inputs, now: Duration);

    /// Called once the component is attached and laid out.
    fn on_mounted(&mut self, cx: &mut H, now: Duration);

    /// Called when the component is removed. Must release every listener.
    fn on_destroy(&mut self, cx: &mut H);
}

/// Listener handles owned by one component instance.
#[derive(Debug, Default)]
pub struct ListenerSet {
    handles: Vec<(ListenerKind, ListenerHandle)>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener and remember its handle.
    pub fn acquire<N, R>(&mut self, registry: &mut R, target: Option<&N>, kind: ListenerKind)
    where
        R: ListenerRegistry<N> + ?Sized,
    {
        let handle = registry.add_listener(target, kind);
        perch_core::trace!(?kind, handle = handle.0, "listener acquired");
        self.handles.push((kind, handle));
    }

    /// Detach every listener this set holds.
    pub fn release_all<N, R>(&mut self, registry: &mut R)
    where
        R: ListenerRegistry<N> + ?Sized,
    {
        for (kind, handle) in self.handles.drain(..) {
            perch_core::trace!(?kind, handle = handle.0, "listener released");
            registry.remove_listener(handle);
        }
    }

    /// Whether a listener of `kind` is attached.
    #[must_use]
    pub fn is_active(&self, kind: ListenerKind) -> bool {
        self.handles.iter().any(|&(k, _)| k == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            perch_core::warn!(
                leaked = self.handles.len(),
                "listener set dropped without release"
            );
        }
    }
}
