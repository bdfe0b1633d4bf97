use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

type Slot<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct SignalInner<T> {
    next_id: Cell<u64>,
    slots: RefCell<Vec<(u64, Slot<T>)>>,
}

impl<T> SignalInner<T> {
    fn disconnect(&self, id: u64) {
        self.slots.borrow_mut().retain(|(slot_id, _)| *slot_id != id);
    }
}

/// Synchronous change notification
///
/// [`Signal::emit`] calls every connected callback, in connection order,
/// before it returns. Callbacks may read the emitting property and may
/// connect or disconnect other callbacks. A callback that (indirectly)
/// triggers its own signal is not re-entered.
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SignalInner {
                next_id: Cell::new(0),
                slots: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register callback
    ///
    /// Callback stays connected until the returned [`Subscription`] is dropped.
    pub fn connect<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let slot: Slot<T> = Rc::new(RefCell::new(callback));
        self.inner.slots.borrow_mut().push((id, slot));

        let weak: Weak<SignalInner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            disconnect: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.disconnect(id);
                }
            })),
        }
    }

    /// Notify all subscribers
    pub fn emit(&self, value: &T) {
        // Snapshot, callbacks are free to (dis)connect while we iterate
        let slots: Vec<Slot<T>> = self
            .inner
            .slots
            .borrow()
            .iter()
            .map(|(_, slot)| slot.clone())
            .collect();

        for slot in slots {
            match slot.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(value),
                Err(_) => tracing::warn!("Skipping recursive notification"),
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.slots.borrow().len()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Connection of a callback to a [`Signal`]
///
/// Disconnects on drop.
#[must_use = "callback is disconnected when the subscription is dropped"]
pub struct Subscription {
    disconnect: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the callback connected for the lifetime of the signal
    pub fn detach(mut self) {
        self.disconnect = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}
