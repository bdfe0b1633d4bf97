use std::{fmt::Display, rc::Rc};

use anyhow::{bail, Context, Result};
use nalgebra::Vector3;
use volview_lib::{
    premade::PremadeColorMaps,
    properties::{SnapshotPublisher, SnapshotReader},
    render::{
        gpu::TextureStore, ArcballInteractor, Interactive, ObliqueInteractor, RayCastView,
        SliceView, Surface, TransferTextureSync,
    },
    transfer::{TransferEditor, TF_SAMPLES},
    ColorMapStore, HubRef, PropertyHub,
};

use super::{
    backend::{HeadlessContext, HeadlessTextures},
    phantom::SphereGenerator,
    script::{Command, Target},
};
use crate::config::Config;

/// Counters printed when the session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub commands: usize,
    pub programs: usize,
    pub draws: u64,
    pub vertices: u64,
    pub uploads: u64,
}

impl Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} commands, {} programs, {} draws ({} vertices), {} transfer uploads",
            self.commands, self.programs, self.draws, self.vertices, self.uploads
        )
    }
}

/// Everything one viewer window holds
///
/// Two views and the transfer function editor share one hub,
/// the texture sync keeps the transfer texture up to date.
pub struct Session {
    hub: HubRef,
    gl: HeadlessContext,
    textures: Rc<HeadlessTextures>,
    color_maps: Rc<PremadeColorMaps>,
    raycast: Interactive<RayCastView, ArcballInteractor>,
    slice: Interactive<SliceView, ObliqueInteractor>,
    editor: TransferEditor,
    sync: TransferTextureSync,
    publisher: Option<SnapshotPublisher>,
    commands: usize,
}

impl Session {
    pub fn new(config: &Config) -> Result<Session> {
        let mut color_maps = PremadeColorMaps::new();
        for path in &config.color_map_files {
            let name = color_maps
                .load_file(path)
                .with_context(|| format!("Cannot load color map {}", path.display()))?;
            tracing::info!(%name, "Color map loaded");
        }
        if !color_maps.contains(&config.color_map) {
            bail!(
                "Unknown color map '{}', available: {}",
                config.color_map,
                color_maps.names().join(", ")
            );
        }
        let color_maps = Rc::new(color_maps);

        let hub = HubRef::new(PropertyHub::new(
            config.plane,
            &config.color_map,
            config.gradient_method,
        ));

        let textures = Rc::new(HeadlessTextures::new(config.volume_dims));
        let store: Rc<dyn TextureStore> = textures.clone();

        let mut gl = HeadlessContext::new();

        let mut raycast = Interactive::new(
            RayCastView::new(&hub, store.clone(), config.render),
            ArcballInteractor::new(),
        );
        let mut slice = Interactive::new(SliceView::new(&hub, store.clone()), ObliqueInteractor);
        raycast.initialize(&mut gl);
        slice.initialize(&mut gl);
        raycast.resize(config.viewport);
        slice.resize(config.viewport);

        let mut editor = TransferEditor::new(hub.clone(), config.viewport);
        editor.set_histogram(&SphereGenerator::new(config.volume_dims).histogram());

        let sync = TransferTextureSync::attach(&hub, store, color_maps.clone());

        tracing::info!(
            viewport = ?config.viewport,
            dims = ?config.volume_dims,
            color_map = %config.color_map,
            gradient = %config.gradient_method,
            "Session started"
        );

        Ok(Session {
            hub,
            gl,
            textures,
            color_maps,
            raycast,
            slice,
            editor,
            sync,
            publisher: None,
            commands: 0,
        })
    }

    pub fn hub(&self) -> &HubRef {
        &self.hub
    }

    pub fn color_maps(&self) -> &PremadeColorMaps {
        &self.color_maps
    }

    /// Hand hub state over to another thread
    ///
    /// Every reader is woken by each change, all disconnect when the session ends.
    pub fn snapshot_reader(&mut self) -> SnapshotReader {
        if let Some(publisher) = &self.publisher {
            return publisher.subscribe();
        }
        let (publisher, reader) = SnapshotPublisher::attach(&self.hub);
        self.publisher = Some(publisher);
        reader
    }

    /// Apply commands in order, repainting changed views after each one
    pub fn run(&mut self, commands: &[Command]) -> Result<()> {
        for (i, command) in commands.iter().enumerate() {
            self.apply(command)
                .with_context(|| format!("Command {} failed: {:?}", i + 1, command))?;
            self.paint_dirty();
        }
        Ok(())
    }

    pub fn apply(&mut self, command: &Command) -> Result<()> {
        self.commands += 1;
        tracing::debug!(?command, "Applying");

        match command {
            Command::Input { target, event } => {
                let changed = match target {
                    Target::RayCast => self.raycast.handle_event(event),
                    Target::Slice => self.slice.handle_event(event),
                    Target::Editor => self.editor.handle_event(event),
                };
                if !changed {
                    tracing::trace!(?target, "Event ignored");
                }
            }
            Command::Plane(equation) => {
                self.hub.clipping_plane().set_equation(*equation);
            }
            Command::Distance(distance) => {
                self.hub.clipping_plane().set_distance(*distance);
            }
            Command::Gradient(method) => {
                self.hub.gradient().set_method(*method);
            }
            Command::ColorMap(name) => {
                if !self.color_maps.contains(name) {
                    bail!("Unknown color map '{}'", name);
                }
                self.hub.transfer_function().set_color_map(name);
            }
            Command::AddPoint(point) => {
                if !self.hub.transfer_function().add_control_point(*point) {
                    tracing::warn!(?point, "Control point not added");
                }
            }
            Command::RemovePoint(point) => {
                if !self.hub.transfer_function().remove_control_point(*point) {
                    tracing::warn!(?point, "No such control point");
                }
            }
            Command::ResetCurve => self.hub.transfer_function().reset(),
            Command::Projection(projection) => {
                self.raycast.surface_mut().set_projection(*projection);
            }
            Command::Volume(dims) => self.load_volume(*dims),
            Command::Resize(viewport) => {
                self.raycast.resize(*viewport);
                self.slice.resize(*viewport);
                self.editor.resize(*viewport);
            }
            Command::Paint => {
                self.raycast.request_redraw();
                self.slice.request_redraw();
            }
        }
        Ok(())
    }

    /// Paint views that changed since their last paint
    pub fn paint_dirty(&mut self) {
        if self.raycast.needs_redraw() {
            self.raycast.paint(&mut self.gl);
        }
        if self.slice.needs_redraw() {
            self.slice.paint(&mut self.gl);
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            commands: self.commands,
            programs: self.gl.program_count(),
            draws: self.gl.draw_count(),
            vertices: self.gl.vertex_count(),
            uploads: self.sync.upload_count(),
        }
    }

    /// Disconnect snapshot readers, returns final counters
    pub fn finish(self) -> SessionSummary {
        let summary = self.summary();
        tracing::info!(
            uploaded = self.textures.upload_count(),
            middle_texel = ?self.textures.transfer_texel(TF_SAMPLES / 2),
            points = self.editor.state().points.len(),
            "Session finished"
        );
        summary
    }

    fn load_volume(&mut self, dims: Vector3<u32>) {
        self.textures.load_volume(dims);
        let view = self.raycast.surface_mut();
        view.volume_dimensions_changed(dims.cast::<f32>());
        view.volume_loaded();
        self.editor
            .set_histogram(&SphereGenerator::new(dims).histogram());
    }
}
