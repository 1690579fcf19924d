#![forbid(unsafe_code)]

//! Event queue shared between native listeners and the tick loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use perch_core::event::HostEvent;

/// FIFO of host events. Clones share the same queue.
///
/// Listener closures hold a clone and push; the tick loop drains.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<HostEvent>>>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: HostEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Take every queued event, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<HostEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}
