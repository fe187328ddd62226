use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use foundation::geo::Coordinate;

/// A user click on the map, in Web Mercator meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClickEvent {
    pub coordinate: Coordinate,
}

#[derive(Debug, Default)]
struct BusInner {
    next: u64,
    queues: BTreeMap<u64, VecDeque<ClickEvent>>,
}

/// Fan-out of map click events to scoped subscribers.
///
/// Subscriptions are RAII guards: dropping a [`ClickSubscription`] releases
/// it, so re-running an attach step can never accumulate listeners.
#[derive(Debug, Clone, Default)]
pub struct ClickBus {
    inner: Rc<RefCell<BusInner>>,
}

impl ClickBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> ClickSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next;
        inner.next += 1;
        inner.queues.insert(id, VecDeque::new());
        ClickSubscription {
            id,
            inner: Rc::clone(&self.inner),
        }
    }

    /// Delivers `event` to every live subscription.
    pub fn publish(&self, event: ClickEvent) {
        let mut inner = self.inner.borrow_mut();
        for queue in inner.queues.values_mut() {
            queue.push_back(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().queues.len()
    }
}

/// A live click subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ClickSubscription {
    id: u64,
    inner: Rc<RefCell<BusInner>>,
}

impl ClickSubscription {
    /// Next undelivered click, oldest first.
    pub fn poll(&self) -> Option<ClickEvent> {
        self.inner
            .borrow_mut()
            .queues
            .get_mut(&self.id)
            .and_then(|q| q.pop_front())
    }
}

impl Drop for ClickSubscription {
    fn drop(&mut self) {
        self.inner.borrow_mut().queues.remove(&self.id);
    }
}
