pub mod constants;
pub mod gesture;
pub mod normalize;
mod options;
pub mod overlay;
mod registry;
pub mod render;
mod session;
mod signature;
pub mod submit;
mod types;

pub use normalize::{to_fractional, to_pixels};
pub use options::SignOptions;
pub use overlay::{OverlayController, OverlayGeometry, OverlayState};
pub use registry::PlacementRegistry;
pub use render::{LopdfPageRenderer, PageRenderer, load_pdf_bytes, read_pdf};
pub use session::EditingSession;
pub use signature::{SignatureLoad, SignatureState, probe_dimensions};
pub use submit::{
    OutboxManifest, OutboxUploadService, SubmissionRequest, UploadService,
    submission_error_from_body, validate_placement,
};
pub use types::*;
