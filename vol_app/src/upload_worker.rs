use std::thread::JoinHandle;

use anyhow::{anyhow, Result};
use crossbeam_channel::{Receiver, Sender};
use volview_lib::{
    premade::PremadeColorMaps, properties::SnapshotReader, ColorMapStore, ControlPointCurve,
};

/// Lookup table built from one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    pub revision: u64,
    pub color_map: String,
    pub control_points: usize,
    /// Entries with non-zero opacity
    pub visible_entries: usize,
}

/// Builds transfer lookup tables off the UI thread
///
/// Follows the hub through a [`SnapshotReader`], intermediate states are skipped
/// when the worker falls behind. Stops once the session drops its publisher.
pub struct UploadWorker {
    handle: JoinHandle<usize>,
    reports: Receiver<UploadReport>,
}

impl UploadWorker {
    pub fn start(reader: SnapshotReader, color_maps: PremadeColorMaps) -> UploadWorker {
        let (sender, reports) = crossbeam_channel::unbounded();
        let handle = std::thread::spawn(move || run(reader, color_maps, sender));
        UploadWorker { handle, reports }
    }

    /// Reports produced so far, does not block
    pub fn drain(&self) -> Vec<UploadReport> {
        self.reports.try_iter().collect()
    }

    /// Wait for the thread to end, returns the reports it left behind
    pub fn join(self) -> Result<Vec<UploadReport>> {
        let built = self
            .handle
            .join()
            .map_err(|_| anyhow!("Upload worker panicked"))?;
        tracing::debug!(built, "Upload worker joined");
        Ok(self.reports.try_iter().collect())
    }
}

fn run(reader: SnapshotReader, color_maps: PremadeColorMaps, reports: Sender<UploadReport>) -> usize {
    let mut built = 0;
    while let Some(snapshot) = reader.wait() {
        let color_map = match color_maps.color_map(&snapshot.color_map) {
            Some(map) => map,
            None => {
                tracing::warn!(name = %snapshot.color_map, "Worker has no such color map");
                continue;
            }
        };

        let curve = ControlPointCurve::from_points(snapshot.control_points.iter().copied());
        let lut = curve.apply_transfer_function(color_map);
        built += 1;

        let report = UploadReport {
            revision: snapshot.revision,
            color_map: snapshot.color_map.clone(),
            control_points: curve.len(),
            visible_entries: lut.iter().filter(|c| c.w > 0.0).count(),
        };
        tracing::debug!(?report, "Lookup table built");

        if reports.send(report).is_err() {
            break;
        }
    }
    built
}

#[cfg(test)]
mod test {

    use nalgebra::point;
    use volview_lib::{properties::SnapshotPublisher, HubRef};

    use super::*;

    #[test]
    fn follows_hub_until_publisher_drops() {
        let hub = HubRef::default();
        let (publisher, reader) = SnapshotPublisher::attach(&hub);
        let worker = UploadWorker::start(reader, PremadeColorMaps::new());

        hub.transfer_function()
            .add_control_point(point![2048.0, 0.0]);
        hub.transfer_function().set_color_map("hot");
        drop(publisher);

        let reports = worker.join().unwrap();

        // Worker may skip intermediate states, never the last one
        let last = reports.last().unwrap();
        assert_eq!(last.revision, 2);
        assert_eq!(last.color_map, "hot");
        assert_eq!(last.control_points, 3);
        assert_eq!(last.visible_entries, 2047);
    }

    #[test]
    fn unknown_color_map_is_skipped() {
        let hub = HubRef::default();
        let (publisher, reader) = SnapshotPublisher::attach(&hub);
        let worker = UploadWorker::start(reader, PremadeColorMaps::new());

        hub.transfer_function().set_color_map("nothing");
        drop(publisher);

        assert!(worker.join().unwrap().is_empty());
    }
}
