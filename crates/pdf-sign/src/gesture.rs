//! Pointer gesture state for a single overlay
//!
//! Each drag or resize gets a fresh `ActiveGesture` holding the rectangle at
//! gesture start and the pointer delta accumulated since. Live geometry is
//! derived from those two values and is never clamped; bounds are enforced
//! once, when the gesture ends.

use crate::types::{Edges, PixelRect, SurfaceSize};

/// What the pointer is doing to the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(Edges),
}

/// An in-progress gesture: `{ origin, accumulated delta }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveGesture {
    pub kind: GestureKind,
    /// Overlay rectangle when the gesture started
    pub origin: PixelRect,
    pub dx: f32,
    pub dy: f32,
}

impl ActiveGesture {
    pub fn drag(origin: PixelRect) -> Self {
        Self {
            kind: GestureKind::Drag,
            origin,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn resize(origin: PixelRect, edges: Edges) -> Self {
        Self {
            kind: GestureKind::Resize(edges),
            origin,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Fold one more pointer movement into the gesture
    pub fn accumulate(self, dx: f32, dy: f32) -> Self {
        Self {
            dx: self.dx + dx,
            dy: self.dy + dy,
            ..self
        }
    }

    /// Rectangle to display while the pointer is still down
    pub fn current_rect(&self) -> PixelRect {
        match self.kind {
            GestureKind::Drag => self.origin.translated(self.dx, self.dy),
            GestureKind::Resize(edges) => resize_rect(&self.origin, edges, self.dx, self.dy),
        }
    }

    /// Final rectangle once the pointer is released, pulled inside the surface
    pub fn finish(&self, surface: SurfaceSize, min_size: f32) -> PixelRect {
        let rect = self.current_rect();
        match self.kind {
            GestureKind::Drag => clamp_position(&rect, surface),
            GestureKind::Resize(edges) => {
                let bounded = intersect_surface(&rect, surface);
                let floored = apply_min_size(&bounded, edges, min_size);
                clamp_position(&floored, surface)
            }
        }
    }
}

/// Move the grabbed edges by the pointer delta; the other edges stay put.
pub fn resize_rect(origin: &PixelRect, edges: Edges, dx: f32, dy: f32) -> PixelRect {
    let mut left = origin.left;
    let mut top = origin.top;
    let mut right = origin.right();
    let mut bottom = origin.bottom();

    if edges.left {
        left += dx;
    } else if edges.right {
        right += dx;
    }
    if edges.top {
        top += dy;
    } else if edges.bottom {
        bottom += dy;
    }

    PixelRect::new(left, top, right - left, bottom - top)
}

/// Keep the size, shift the rectangle back inside the surface.
///
/// A rectangle larger than the surface is pinned to the top-left corner.
pub fn clamp_position(rect: &PixelRect, surface: SurfaceSize) -> PixelRect {
    let max_left = (surface.width - rect.width).max(0.0);
    let max_top = (surface.height - rect.height).max(0.0);

    PixelRect {
        left: rect.left.clamp(0.0, max_left),
        top: rect.top.clamp(0.0, max_top),
        ..*rect
    }
}

/// Cut off whatever part of the rectangle lies outside the surface
fn intersect_surface(rect: &PixelRect, surface: SurfaceSize) -> PixelRect {
    let left = rect.left.max(0.0);
    let top = rect.top.max(0.0);
    let right = rect.right().min(surface.width);
    let bottom = rect.bottom().min(surface.height);

    PixelRect::new(left, top, right - left, bottom - top)
}

/// Grow a collapsed or inverted rectangle to `min_size`, keeping the edge
/// that was not being dragged where it is.
fn apply_min_size(rect: &PixelRect, edges: Edges, min_size: f32) -> PixelRect {
    let mut out = *rect;

    if out.width < min_size {
        if edges.left {
            out.left = rect.right() - min_size;
        }
        out.width = min_size;
    }
    if out.height < min_size {
        if edges.top {
            out.top = rect.bottom() - min_size;
        }
        out.height = min_size;
    }

    out
}
