//! Signature overlay lifecycle
//!
//! Each page holds at most one overlay. An overlay's pixel rectangle follows
//! the pointer while a gesture runs; when the gesture ends the rectangle is
//! clamped to the page, normalized, and written to the registry. The registry
//! always has an entry for every overlay, starting from creation.

use crate::gesture::{ActiveGesture, GestureKind};
use crate::normalize::{to_fractional, to_pixels};
use crate::registry::PlacementRegistry;
use crate::types::*;
use std::collections::BTreeMap;

/// Where a page's overlay is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Empty,
    Placed,
    Dragging,
    Resizing,
}

/// Geometry used when creating an overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    /// Overlay width as a fraction of the surface width
    pub width_fraction: f32,
    /// Distance from the overlay's bottom edge to the surface's bottom edge
    pub bottom_margin_px: f32,
    /// Size floor applied when a resize ends
    pub min_size_px: f32,
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self {
            width_fraction: crate::constants::DEFAULT_WIDTH_FRACTION,
            bottom_margin_px: crate::constants::DEFAULT_BOTTOM_MARGIN_PX,
            min_size_px: crate::constants::MIN_OVERLAY_PX,
        }
    }
}

impl OverlayGeometry {
    /// Default rectangle for a new overlay: centered horizontally, sitting
    /// just above the bottom edge, with the signature's proportions.
    pub fn default_rect(&self, surface: SurfaceSize, aspect_ratio: f32) -> PixelRect {
        let width = surface.width * self.width_fraction;
        let height = width / aspect_ratio;

        PixelRect {
            left: (surface.width - width) / 2.0,
            top: surface.height - height - self.bottom_margin_px,
            width,
            height,
        }
    }
}

/// One signature overlay on a page
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Committed pixel rectangle
    rect: PixelRect,
    gesture: Option<ActiveGesture>,
}

impl Overlay {
    /// Rectangle to draw right now, including any in-progress gesture
    pub fn display_rect(&self) -> PixelRect {
        self.gesture
            .map(|g| g.current_rect())
            .unwrap_or(self.rect)
    }

    /// Rectangle as of the last committed gesture
    pub fn committed_rect(&self) -> PixelRect {
        self.rect
    }

    fn state(&self) -> OverlayState {
        match self.gesture.map(|g| g.kind) {
            None => OverlayState::Placed,
            Some(GestureKind::Drag) => OverlayState::Dragging,
            Some(GestureKind::Resize(_)) => OverlayState::Resizing,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlayController {
    overlays: BTreeMap<usize, Overlay>,
    geometry: OverlayGeometry,
}

impl OverlayController {
    pub fn new(geometry: OverlayGeometry) -> Self {
        Self {
            overlays: BTreeMap::new(),
            geometry,
        }
    }

    pub fn state(&self, page: usize) -> OverlayState {
        self.overlays
            .get(&page)
            .map(Overlay::state)
            .unwrap_or(OverlayState::Empty)
    }

    pub fn overlay(&self, page: usize) -> Option<&Overlay> {
        self.overlays.get(&page)
    }

    /// Pages that currently show an overlay
    pub fn pages(&self) -> Vec<usize> {
        self.overlays.keys().copied().collect()
    }

    /// Place a fresh overlay on a page, replacing any overlay already there.
    ///
    /// The caller is responsible for checking that a signature is loaded.
    pub fn create(
        &mut self,
        page: usize,
        surface: SurfaceSize,
        aspect_ratio: f32,
        registry: &mut PlacementRegistry,
    ) -> Result<Placement> {
        let rect = self.geometry.default_rect(surface, aspect_ratio);
        let placement = Placement::new(page, to_fractional(&rect, surface)?);

        self.remove(page, registry);
        self.overlays.insert(page, Overlay { rect, gesture: None });
        registry.set(page, placement);

        log::debug!("Created overlay on page {} at {:?}", page, rect);
        Ok(placement)
    }

    /// Apply one gesture event to a page's overlay.
    ///
    /// Returns the committed placement when the event ended a gesture.
    /// `surface` is only read on `End`, where the result is clamped to it.
    pub fn handle_gesture(
        &mut self,
        page: usize,
        event: GestureEvent,
        surface: SurfaceSize,
        registry: &mut PlacementRegistry,
    ) -> Result<Option<Placement>> {
        let min_size = self.geometry.min_size_px;
        let Some(overlay) = self.overlays.get_mut(&page) else {
            log::debug!("Ignoring {:?} for page {} without an overlay", event, page);
            return Ok(None);
        };

        match event {
            GestureEvent::DragMove { dx, dy } => {
                let gesture = overlay.gesture.unwrap_or_else(|| ActiveGesture::drag(overlay.rect));
                if gesture.kind != GestureKind::Drag {
                    log::warn!("Drag move during resize on page {}, ignored", page);
                    return Ok(None);
                }
                overlay.gesture = Some(gesture.accumulate(dx, dy));
                Ok(None)
            }
            GestureEvent::ResizeMove { edges, dx, dy } => {
                let gesture = overlay
                    .gesture
                    .unwrap_or_else(|| ActiveGesture::resize(overlay.rect, edges));
                if gesture.kind == GestureKind::Drag {
                    log::warn!("Resize move during drag on page {}, ignored", page);
                    return Ok(None);
                }
                overlay.gesture = Some(gesture.accumulate(dx, dy));
                Ok(None)
            }
            GestureEvent::End => {
                let Some(gesture) = overlay.gesture else {
                    return Ok(None);
                };
                let rect = gesture.finish(surface, min_size);
                let placement = Placement::new(page, to_fractional(&rect, surface)?);

                overlay.rect = rect;
                overlay.gesture = None;
                registry.set(page, placement);
                Ok(Some(placement))
            }
        }
    }

    /// Remove a page's overlay and its placement. Removing nothing is fine.
    pub fn remove(&mut self, page: usize, registry: &mut PlacementRegistry) {
        if self.overlays.remove(&page).is_some() {
            log::debug!("Removed overlay on page {}", page);
        }
        registry.remove(page);
    }

    /// Remove every overlay and every placement
    pub fn clear(&mut self, registry: &mut PlacementRegistry) {
        self.overlays.clear();
        registry.clear();
    }

    /// Recompute overlay pixel rectangles from their committed placements
    /// after the page surfaces changed size. Any gesture in progress is
    /// dropped.
    pub fn rescale<F>(&mut self, registry: &PlacementRegistry, mut surface_for: F) -> Result<()>
    where
        F: FnMut(usize) -> Result<SurfaceSize>,
    {
        for (page, overlay) in self.overlays.iter_mut() {
            if let Some(placement) = registry.get(*page) {
                overlay.rect = to_pixels(&placement.rect(), surface_for(*page)?)?;
                overlay.gesture = None;
            }
        }
        Ok(())
    }
}
