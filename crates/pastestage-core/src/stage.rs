//! Staging lifecycle: acquire, interact, accept or cancel.
//!
//! [`StagingEngine`] owns at most one [`StagedPlacement`] at a time. While a
//! placement exists the host is in staging mode and an overlay surface shows
//! the image with its handles. Accepting composites the placement into the
//! active document layer and records an undo checkpoint; cancelling simply
//! discards it. Both paths tear down the overlay.

use crate::config::StageConfig;
use crate::decode::decode_image;
use crate::error::StageError;
use crate::geometry::{CoordinateMapper, Point};
use crate::handles::{compute_handles, hit_test, Cursor, Handle, Hit};
use crate::host::Host;
use crate::interaction::{Gesture, TransformStateMachine};
use crate::placement::{ImageHandle, StagedPlacement};
use crate::render::{composite, render_overlay};
use crate::surface::Surface;

/// Interactive transform engine for a single pasted image.
pub struct StagingEngine<H: Host> {
    host: H,
    config: StageConfig,
    placement: Option<StagedPlacement>,
    interaction: TransformStateMachine,
    overlay: Option<Box<dyn Surface>>,
}

impl<H: Host> StagingEngine<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, StageConfig::default())
    }

    pub fn with_config(host: H, config: StageConfig) -> Self {
        Self {
            host,
            config,
            placement: None,
            interaction: TransformStateMachine::new(),
            overlay: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn placement(&self) -> Option<&StagedPlacement> {
        self.placement.as_ref()
    }

    pub fn is_staging(&self) -> bool {
        self.placement.is_some()
    }

    /// Current gesture; `None` when idle.
    pub fn mode(&self) -> Option<Gesture> {
        self.interaction.gesture()
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    pub fn is_resizing(&self) -> bool {
        self.interaction.is_resizing()
    }

    pub fn is_rotating(&self) -> bool {
        self.interaction.is_rotating()
    }

    /// The overlay surface, present from the first render until teardown.
    pub fn overlay(&self) -> Option<&dyn Surface> {
        self.overlay.as_deref()
    }

    /// Mapping between display and document space, read live from the host.
    pub fn mapper(&self) -> CoordinateMapper {
        match self.host.display_origin() {
            Some(origin) => CoordinateMapper::new(origin, self.host.zoom_ratio()),
            None => CoordinateMapper::unavailable(),
        }
    }

    /// Handles of the current placement in display space.
    pub fn handles(&self) -> Vec<Handle> {
        match &self.placement {
            Some(placement) => compute_handles(placement.bounds(), &self.mapper(), &self.config),
            None => Vec::new(),
        }
    }

    pub fn hit_test(&self, pointer: Point) -> Option<Hit> {
        let placement = self.placement.as_ref()?;
        hit_test(pointer, placement.bounds(), &self.mapper(), &self.config)
    }

    /// Cursor to show for a hovering pointer.
    ///
    /// Always the default cursor while the display surface is unavailable.
    pub fn cursor_for(&self, pointer: Point) -> Cursor {
        if !self.mapper().is_available() {
            return Cursor::Default;
        }
        Cursor::for_hit(self.hit_test(pointer).as_ref())
    }

    /// Stage an image centered on the visible part of the document.
    ///
    /// The center is the container's center mapped into document space.
    /// Returns `false` if the container is unavailable or a placement is
    /// already active.
    pub fn acquire(&mut self, image: ImageHandle) -> bool {
        let Some(container) = self.host.container_rect() else {
            log::debug!("Container unavailable, paste ignored");
            return false;
        };
        let center = self.mapper().to_document(container.center());
        self.acquire_at(image, center)
    }

    /// Stage an image at its natural size centered on a document-space point.
    ///
    /// Rejected while another placement is active, in which case the
    /// existing placement is left untouched, and for images without pixels.
    pub fn acquire_at(&mut self, image: ImageHandle, center: Point) -> bool {
        if self.placement.is_some() {
            log::debug!("Placement already active, paste ignored");
            return false;
        }
        if image.width() == 0 || image.height() == 0 {
            log::debug!("Empty image, paste ignored");
            return false;
        }

        let placement = StagedPlacement::centered_at(image, center, self.config.default_opacity);
        log::debug!(
            "Staging {}x{} image at ({}, {})",
            placement.width,
            placement.height,
            placement.x,
            placement.y
        );
        self.placement = Some(placement);
        self.host.set_staging_mode(true);
        self.render();
        true
    }

    /// Decode pasted bytes and stage the result.
    ///
    /// Returns `Ok(false)` without decoding while a placement is active.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the bytes are not a readable image. No
    /// state changes in that case.
    pub fn acquire_encoded(&mut self, bytes: &[u8]) -> Result<bool, StageError> {
        if self.placement.is_some() {
            log::debug!("Placement already active, paste ignored");
            return Ok(false);
        }

        let image = decode_image(bytes).inspect_err(|e| {
            log::warn!("Failed to load pasted image: {}", e);
        })?;
        Ok(self.acquire(image))
    }

    /// Pointer down. Returns `true` if a gesture started.
    ///
    /// No gesture starts while the display surface is unavailable.
    pub fn start_interaction(&mut self, pointer: Point) -> bool {
        let mapper = self.mapper();
        if !mapper.is_available() {
            log::debug!("Display surface unavailable, pointer down ignored");
            return false;
        }
        let Some(placement) = &self.placement else {
            return false;
        };
        self.interaction.start(placement, pointer, &mapper, &self.config)
    }

    /// Pointer move. Returns `true` if the placement changed.
    ///
    /// While the display surface is unavailable the placement is left as is;
    /// the gesture stays active and resumes once the surface is back.
    pub fn update_interaction(&mut self, pointer: Point) -> bool {
        let mapper = self.mapper();
        if !mapper.is_available() {
            log::debug!("Display surface unavailable, pointer move ignored");
            return false;
        }
        let Some(placement) = self.placement.as_mut() else {
            return false;
        };
        if !self.interaction.update(placement, pointer, &mapper, &self.config) {
            return false;
        }
        self.render();
        true
    }

    /// Pointer up.
    pub fn end_interaction(&mut self) {
        self.interaction.end();
    }

    /// Composite the placement into the active layer and end staging.
    ///
    /// Returns `false` and keeps the placement if there is nothing staged or
    /// the target layer is unavailable.
    pub fn accept(&mut self) -> bool {
        let Some(placement) = &self.placement else {
            return false;
        };

        let layer = self.host.active_layer();
        let Some(target) = self.host.layer_surface(layer) else {
            log::debug!("Layer {} unavailable, accept ignored", layer.as_str());
            return false;
        };
        composite(target, placement);
        self.host.save_checkpoint();
        log::debug!("Placement committed to {} layer", layer.as_str());

        self.cancel();
        true
    }

    /// Discard the placement and tear down the overlay. Safe to repeat.
    pub fn cancel(&mut self) {
        if self.placement.take().is_some() {
            log::debug!("Staging ended");
        }
        self.interaction.end();
        self.overlay = None;
        self.host.set_staging_mode(false);
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        let Some(placement) = self.placement.as_mut() else {
            return;
        };
        placement.opacity = opacity;
        self.render();
    }

    /// Repaint the overlay, creating it on first use.
    ///
    /// Skipped when the container or document surface is unavailable.
    pub fn render(&mut self) {
        let mapper = self.mapper();
        let Some(placement) = &self.placement else {
            return;
        };
        if self.host.container_rect().is_none() {
            log::debug!("Container unavailable, overlay not rendered");
            return;
        }
        let Some((width, height)) = self.host.document_size() else {
            log::debug!("Document surface unavailable, overlay not rendered");
            return;
        };

        if self.overlay.is_none() {
            self.overlay = self.host.create_overlay(width, height);
        }
        let Some(overlay) = self.overlay.as_mut() else {
            log::debug!("Overlay surface unavailable");
            return;
        };
        if overlay.dimensions() != (width, height) {
            overlay.resize(width, height);
        }
        render_overlay(&mut **overlay, placement, &mapper, &self.config);
    }
}
