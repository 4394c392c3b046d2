use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Page surface has no area ({width}x{height})")]
    DegenerateSurface { width: f32, height: f32 },
    #[error("Load a signature image first")]
    NoSignatureLoaded,
    #[error("Could not read signature image dimensions: {0}")]
    ImageProbe(String),
    #[error("{0}")]
    Submission(String),
    #[error("Page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),
    #[error("No document loaded")]
    NoDocument,
}

pub type Result<T> = std::result::Result<T, SignError>;

/// Size of a rendered page surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A rectangle in surface pixels, origin at the top-left corner of the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Shift by a pixel delta without changing size
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }
}

/// A rectangle expressed as fractions of the page surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FractionalRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Rectangle in PDF user space: points, origin at the bottom-left of the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl PdfRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Where a signature goes on one page, independent of display scale.
///
/// This is the record handed to the processing backend, so its JSON shape
/// (`page`, `x`, `y`, `width`, `height`) is part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Zero-based page index
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    pub fn new(page: usize, rect: FractionalRect) -> Self {
        Self {
            page,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn rect(&self) -> FractionalRect {
        FractionalRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Processing mode applied by the backend to the finished document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep colors
    #[default]
    Color,
    /// Grayscale
    Gray,
    /// High-contrast black and white
    Bw,
}

impl FilterMode {
    /// Form value understood by the backend
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::Color => "color",
            FilterMode::Gray => "gray",
            FilterMode::Bw => "bw",
        }
    }
}

/// Which edges a resize gesture is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Edges {
    pub const TOP_LEFT: Edges = Edges {
        left: true,
        top: true,
        right: false,
        bottom: false,
    };

    pub const BOTTOM_RIGHT: Edges = Edges {
        left: false,
        top: false,
        right: true,
        bottom: true,
    };

    pub const LEFT: Edges = Edges {
        left: true,
        top: false,
        right: false,
        bottom: false,
    };

    pub const RIGHT: Edges = Edges {
        left: false,
        top: false,
        right: true,
        bottom: false,
    };

    pub const TOP: Edges = Edges {
        left: false,
        top: true,
        right: false,
        bottom: false,
    };

    pub const BOTTOM: Edges = Edges {
        left: false,
        top: false,
        right: false,
        bottom: true,
    };
}

/// Pointer events delivered by the gesture layer for one overlay.
///
/// A gesture is a run of moves of one kind followed by exactly one `End`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Incremental pointer movement while dragging the whole overlay
    DragMove { dx: f32, dy: f32 },
    /// Incremental pointer movement of the grabbed edges
    ResizeMove { edges: Edges, dx: f32, dy: f32 },
    /// Pointer released
    End,
}
