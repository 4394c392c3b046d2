//! Shared constants for signature placement
//!
//! Defaults used by the overlay controller, the page renderer and the
//! submission step live here so the options type and the tests agree.

// =============================================================================
// Overlay Geometry
// =============================================================================

/// Default overlay width as a fraction of the page surface width
pub const DEFAULT_WIDTH_FRACTION: f32 = 0.35;

/// Gap between a new overlay's bottom edge and the page's bottom edge, in pixels
pub const DEFAULT_BOTTOM_MARGIN_PX: f32 = 30.0;

/// Smallest width or height an overlay keeps after a resize, in pixels
pub const MIN_OVERLAY_PX: f32 = 8.0;

/// Aspect ratio assumed until a signature image has been probed
pub const DEFAULT_ASPECT_RATIO: f32 = 1.0;

// =============================================================================
// Page Rendering
// =============================================================================

/// Display scale applied to PDF points when sizing page surfaces
pub const DEFAULT_RENDER_SCALE: f32 = 1.3;

/// Page width in points used when a page has no readable MediaBox (US Letter)
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Page height in points used when a page has no readable MediaBox (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

// =============================================================================
// Submission
// =============================================================================

/// File name the processed document is offered under
pub const RESULT_FILE_NAME: &str = "scan_result.pdf";

/// Message shown when the backend fails without a readable detail
pub const GENERIC_SUBMISSION_ERROR: &str = "Document processing failed";
