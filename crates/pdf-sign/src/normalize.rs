//! Conversion between surface pixels and page fractions
//!
//! Placements are stored as fractions of the page surface so they survive
//! re-rendering at another zoom level. No rounding happens here.

use crate::types::*;

/// Convert a pixel rectangle into fractions of the surface.
pub fn to_fractional(rect: &PixelRect, surface: SurfaceSize) -> Result<FractionalRect> {
    check_surface(surface)?;
    Ok(FractionalRect {
        x: rect.left / surface.width,
        y: rect.top / surface.height,
        width: rect.width / surface.width,
        height: rect.height / surface.height,
    })
}

/// Convert a fractional rectangle back into pixels on a surface.
pub fn to_pixels(rect: &FractionalRect, surface: SurfaceSize) -> Result<PixelRect> {
    check_surface(surface)?;
    Ok(PixelRect {
        left: rect.x * surface.width,
        top: rect.y * surface.height,
        width: rect.width * surface.width,
        height: rect.height * surface.height,
    })
}

fn check_surface(surface: SurfaceSize) -> Result<()> {
    if surface.has_area() {
        Ok(())
    } else {
        Err(SignError::DegenerateSurface {
            width: surface.width,
            height: surface.height,
        })
    }
}

impl Placement {
    /// Position on a PDF page of the given size in points.
    ///
    /// Fractions are measured from the top-left of the page while PDF user
    /// space starts at the bottom-left, so the vertical axis is flipped.
    pub fn to_pdf_rect(&self, page_width_pt: f32, page_height_pt: f32) -> PdfRect {
        let width = self.width * page_width_pt;
        let height = self.height * page_height_pt;
        let left = self.x * page_width_pt;
        let bottom = page_height_pt - self.y * page_height_pt - height;

        PdfRect {
            left,
            bottom,
            right: left + width,
            top: bottom + height,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
