//! Coalescing change notification.
//!
//! Every ledger mutation marks the notifier dirty; the UI tick calls
//! [`ChangeNotifier::flush`], which runs each observer once no matter how
//! many mutations happened since the previous tick.

pub type Observer = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct ChangeNotifier {
    dirty: bool,
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, on_change: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, on_change));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Single-slot signal: marking an already dirty notifier is a no-op.
    pub fn mark(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run observers if anything changed. Returns whether they ran.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        for (_, observer) in self.observers.iter_mut() {
            observer();
        }
        true
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("dirty", &self.dirty)
            .field("observers", &self.observers.len())
            .finish()
    }
}
