use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use crate::{
    properties::{HubRef, PropertyHub, Subscription},
    transfer::ColorMapStore,
};

use super::gpu::TextureStore;

/// Keeps the transfer texture equal to the hub transfer function
///
/// The lookup table is rebuilt and uploaded once per curve or color map change.
pub struct TransferTextureSync {
    uploads: Rc<Cell<u64>>,
    _subscriptions: [Subscription; 2],
}

impl TransferTextureSync {
    /// Upload current state and follow changes
    pub fn attach(
        hub: &HubRef,
        textures: Rc<dyn TextureStore>,
        color_maps: Rc<dyn ColorMapStore>,
    ) -> TransferTextureSync {
        let uploads = Rc::new(Cell::new(0));
        let upload = Upload {
            hub: hub.downgrade(),
            textures,
            color_maps,
            uploads: uploads.clone(),
        };
        upload.run();

        let on_curve = upload.clone();
        let subscriptions = [
            hub.transfer_function()
                .on_transfer_function_changed(move |_| on_curve.run()),
            hub.transfer_function()
                .on_color_map_changed(move |_| upload.run()),
        ];

        TransferTextureSync {
            uploads,
            _subscriptions: subscriptions,
        }
    }

    /// Number of uploads done so far
    pub fn upload_count(&self) -> u64 {
        self.uploads.get()
    }
}

#[derive(Clone)]
struct Upload {
    hub: Weak<PropertyHub>,
    textures: Rc<dyn TextureStore>,
    color_maps: Rc<dyn ColorMapStore>,
    uploads: Rc<Cell<u64>>,
}

impl Upload {
    fn run(&self) {
        let hub = match self.hub.upgrade() {
            Some(hub) => hub,
            None => return,
        };

        // Unknown color map keeps the previous texture
        if let Some(lut) = hub.transfer_function().lookup_table(self.color_maps.as_ref()) {
            self.textures.transfer_function().upload(&lut);
            self.uploads.set(self.uploads.get() + 1);
            tracing::debug!(entries = lut.len(), "Transfer texture uploaded");
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use crate::{
        premade::PremadeColorMaps,
        test_helpers::{GpuCommand, MockTextures},
    };

    use super::*;

    #[test]
    fn uploads_once_per_change() {
        let hub = HubRef::default();
        let textures = Rc::new(MockTextures::new(vector![2, 2, 2]));
        let sync = TransferTextureSync::attach(
            &hub,
            textures.clone(),
            Rc::new(PremadeColorMaps::new()),
        );
        assert_eq!(sync.upload_count(), 1);

        hub.transfer_function().add_control_point(point![1000.0, 0.3]);
        hub.transfer_function().set_color_map("hot");
        // rejected edit, no notification
        hub.transfer_function().add_control_point(point![1000.0, 0.9]);

        assert_eq!(sync.upload_count(), 3);
        let uploads = textures
            .log()
            .iter()
            .filter(|c| matches!(c, GpuCommand::UploadTransfer(_)))
            .count();
        assert_eq!(uploads, 3);
    }

    #[test]
    fn unknown_color_map_keeps_texture() {
        let hub = HubRef::default();
        let textures = Rc::new(MockTextures::new(vector![2, 2, 2]));
        let sync = TransferTextureSync::attach(&hub, textures, Rc::new(PremadeColorMaps::new()));

        hub.transfer_function().set_color_map("does-not-exist");

        assert_eq!(sync.upload_count(), 1);
    }
}
