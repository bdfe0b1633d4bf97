use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    sync::Arc,
    time::Duration,
};

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::RwLock;

use crate::{geometry::Plane, transfer::ControlPoint};

use super::{GradientMethod, HubRef, PropertyHub, Subscription};

/// Immutable copy of [`PropertyHub`] state, safe to send to other threads
#[derive(Debug, Clone, PartialEq)]
pub struct HubSnapshot {
    /// Increments with every published change
    pub revision: u64,
    pub plane: Plane,
    pub gradient_method: GradientMethod,
    pub color_map: String,
    pub control_points: Vec<ControlPoint>,
}

type SharedSnapshot = Arc<RwLock<Arc<HubSnapshot>>>;

/// Wake-up senders, one per reader
type Wakers = Rc<RefCell<Vec<Sender<u64>>>>;

/// Publishes hub state to worker threads
///
/// Single writer on the UI thread, any number of [`SnapshotReader`]s
/// obtained with [`subscribe`](Self::subscribe).
/// Every hub notification replaces the shared snapshot and pokes each reader
/// without blocking. Readers always see the latest state, intermediate
/// states may be skipped.
///
/// Dropping the publisher disconnects from the hub and wakes readers with `None`.
pub struct SnapshotPublisher {
    shared: SharedSnapshot,
    revision: Rc<Cell<u64>>,
    wakers: Wakers,
    _subscriptions: Vec<Subscription>,
}

impl SnapshotPublisher {
    /// Subscribe to every hub signal, returns the publisher with its first reader
    pub fn attach(hub: &HubRef) -> (SnapshotPublisher, SnapshotReader) {
        let shared: SharedSnapshot = Arc::new(RwLock::new(Arc::new(hub.snapshot(0))));
        let revision = Rc::new(Cell::new(0));
        let wakers = Wakers::default();

        let publish = Publish {
            hub: hub.downgrade(),
            shared: shared.clone(),
            wakers: wakers.clone(),
            revision: revision.clone(),
        };

        let subscriptions = vec![
            {
                let publish = publish.clone();
                hub.clipping_plane().on_changed(move |_| publish.publish())
            },
            {
                let publish = publish.clone();
                hub.gradient().on_changed(move |_| publish.publish())
            },
            {
                let publish = publish.clone();
                hub.transfer_function()
                    .on_transfer_function_changed(move |_| publish.publish())
            },
            hub.transfer_function()
                .on_color_map_changed(move |_| publish.publish()),
        ];

        let publisher = SnapshotPublisher {
            shared,
            revision,
            wakers,
            _subscriptions: subscriptions,
        };
        let reader = publisher.subscribe();
        (publisher, reader)
    }

    /// New reader, woken by every change published from now on
    pub fn subscribe(&self) -> SnapshotReader {
        // Single slot, a pending wake-up already covers every later change
        let (sender, receiver) = crossbeam::channel::bounded(1);
        self.wakers.borrow_mut().push(sender);
        SnapshotReader {
            shared: self.shared.clone(),
            wake: receiver,
        }
    }

    /// Number of readers still connected
    pub fn reader_count(&self) -> usize {
        self.wakers.borrow().len()
    }

    /// Revision of the last published snapshot
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn latest(&self) -> Arc<HubSnapshot> {
        self.shared.read().clone()
    }
}

#[derive(Clone)]
struct Publish {
    hub: Weak<PropertyHub>,
    shared: SharedSnapshot,
    wakers: Wakers,
    revision: Rc<Cell<u64>>,
}

impl Publish {
    fn publish(&self) {
        let hub = match self.hub.upgrade() {
            Some(hub) => hub,
            None => return,
        };

        let revision = self.revision.get() + 1;
        self.revision.set(revision);
        *self.shared.write() = Arc::new(hub.snapshot(revision));

        self.wakers
            .borrow_mut()
            .retain(|sender| match sender.try_send(revision) {
                Ok(()) | Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => {
                    tracing::trace!(revision, "Snapshot reader disconnected");
                    false
                }
            });
    }
}

/// Read side of [`SnapshotPublisher`]
///
/// Each reader owns its wake-up channel, get more with
/// [`SnapshotPublisher::subscribe`].
pub struct SnapshotReader {
    shared: SharedSnapshot,
    wake: Receiver<u64>,
}

impl SnapshotReader {
    /// Current snapshot, does not block
    pub fn latest(&self) -> Arc<HubSnapshot> {
        self.shared.read().clone()
    }

    /// Block until the next change
    ///
    /// Returns `None` once the publisher is gone.
    pub fn wait(&self) -> Option<Arc<HubSnapshot>> {
        self.wake.recv().ok()?;
        Some(self.latest())
    }

    /// Like [`wait`](Self::wait), gives up after `timeout`
    ///
    /// `Ok(None)` on timeout, `Err(())` once the publisher is gone.
    #[allow(clippy::result_unit_err)]
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Option<Arc<HubSnapshot>>, ()> {
        match self.wake.recv_timeout(timeout) {
            Ok(_) => Ok(Some(self.latest())),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(()),
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::point;

    use super::*;

    #[test]
    fn publishes_latest_state() {
        let hub = HubRef::default();
        let (publisher, reader) = SnapshotPublisher::attach(&hub);

        assert_eq!(reader.latest().revision, 0);

        hub.clipping_plane().set_distance(0.1);
        hub.transfer_function().add_control_point(point![100.0, 0.5]);
        hub.gradient().set_method(GradientMethod::None);

        // Three changes, one pending wake-up
        let snapshot = reader.wait().unwrap();
        assert_eq!(snapshot.revision, 3);
        assert_eq!(publisher.revision(), 3);
        assert_eq!(snapshot.plane.distance(), 0.1);
        assert_eq!(snapshot.control_points.len(), 3);
        assert_eq!(snapshot.gradient_method, GradientMethod::None);
        assert_eq!(
            reader.wait_timeout(Duration::from_millis(1)),
            Ok(None)
        );
    }

    #[test]
    fn reader_on_other_thread() {
        let hub = HubRef::default();
        let (publisher, reader) = SnapshotPublisher::attach(&hub);

        let handle = std::thread::spawn(move || {
            let mut last = None;
            while let Some(snapshot) = reader.wait() {
                last = Some(snapshot.color_map.clone());
            }
            last
        });

        hub.transfer_function().set_color_map("bone");
        drop(publisher);

        assert_eq!(handle.join().unwrap(), Some("bone".to_string()));
    }

    #[test]
    fn every_reader_is_woken() {
        let hub = HubRef::default();
        let (publisher, first) = SnapshotPublisher::attach(&hub);
        let second = publisher.subscribe();
        assert_eq!(publisher.reader_count(), 2);

        hub.clipping_plane().set_distance(0.1);

        let timeout = Duration::from_millis(50);
        let a = first.wait_timeout(timeout).unwrap().unwrap();
        let b = second.wait_timeout(timeout).unwrap().unwrap();
        assert_eq!(a.revision, 1);
        assert_eq!(b.revision, 1);

        drop(publisher);
        assert!(first.wait().is_none());
        assert!(second.wait().is_none());
    }

    #[test]
    fn dropped_reader_is_forgotten() {
        let hub = HubRef::default();
        let (publisher, reader) = SnapshotPublisher::attach(&hub);
        let other = publisher.subscribe();
        drop(other);

        hub.gradient().set_method(GradientMethod::Sobel);

        assert_eq!(publisher.reader_count(), 1);
        assert_eq!(reader.wait().unwrap().revision, 1);
    }

    #[test]
    fn dropping_publisher_disconnects_hub() {
        let hub = HubRef::default();
        let (publisher, reader) = SnapshotPublisher::attach(&hub);
        drop(publisher);

        hub.clipping_plane().set_distance(0.2);

        assert_eq!(reader.latest().revision, 0);
        assert!(reader.wait().is_none());
    }
}
