//! Page surfaces
//!
//! The overlay controller only needs to know how large each page is drawn.
//! `LopdfPageRenderer` derives that from the document's page boxes and the
//! current display scale; a viewer that rasterizes pages itself can supply
//! its own `PageRenderer`.

use crate::constants::{DEFAULT_PAGE_HEIGHT_PT, DEFAULT_PAGE_WIDTH_PT, DEFAULT_RENDER_SCALE};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Source of page surface sizes at the current display scale
pub trait PageRenderer {
    fn page_count(&self) -> usize;

    /// Pixel size of a zero-based page as currently displayed
    fn surface(&self, page: usize) -> Result<SurfaceSize>;

    /// Change the display scale; later `surface` calls reflect it
    fn set_scale(&mut self, scale: f32);
}

/// Page sizes read from a PDF's MediaBox entries
#[derive(Debug, Clone)]
pub struct LopdfPageRenderer {
    /// Page sizes in points, rotation applied
    page_sizes_pt: Vec<(f32, f32)>,
    scale: f32,
}

impl LopdfPageRenderer {
    pub fn new(document: &Document) -> Result<Self> {
        let mut page_sizes_pt = Vec::new();
        for page_id in document.get_pages().into_values() {
            page_sizes_pt.push(page_size_pt(document, page_id)?);
        }

        Ok(Self {
            page_sizes_pt,
            scale: DEFAULT_RENDER_SCALE,
        })
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Page size in PDF points
    pub fn page_size_pt(&self, page: usize) -> Result<(f32, f32)> {
        self.page_sizes_pt
            .get(page)
            .copied()
            .ok_or(SignError::PageOutOfRange {
                page,
                page_count: self.page_sizes_pt.len(),
            })
    }
}

impl PageRenderer for LopdfPageRenderer {
    fn page_count(&self) -> usize {
        self.page_sizes_pt.len()
    }

    fn surface(&self, page: usize) -> Result<SurfaceSize> {
        let (width, height) = self.page_size_pt(page)?;
        Ok(SurfaceSize::new(width * self.scale, height * self.scale))
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }
}

/// Load a PDF from memory
pub async fn load_pdf_bytes(bytes: Vec<u8>) -> Result<Document> {
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Read a PDF file into memory
pub async fn read_pdf(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let bytes = tokio::fs::read(path).await?;
    if bytes.is_empty() {
        return Err(SignError::NoDocument);
    }
    Ok(bytes)
}

/// Displayed size of a page in points: MediaBox, inherited through the page
/// tree if needed, with width and height swapped for quarter-turn rotations.
fn page_size_pt(document: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let page_dict = document.get_dictionary(page_id)?;

    let (width, height) = inherited(document, page_dict, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .and_then(|arr| box_size(arr))
        .unwrap_or((DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT));

    let rotate = inherited(document, page_dict, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .unwrap_or(0);

    if rotate.rem_euclid(180) == 90 {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

/// Look up a page attribute, walking up `Parent` links when it is inherited
fn inherited<'a>(document: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut dict = page;
    // Bounded: malformed page trees can contain cycles
    for _ in 0..32 {
        if let Ok(value) = dict.get(key) {
            return match value {
                Object::Reference(id) => document.get_object(*id).ok(),
                other => Some(other),
            };
        }
        let parent_id = dict.get(b"Parent").and_then(|p| p.as_reference()).ok()?;
        dict = document.get_dictionary(parent_id).ok()?;
    }
    None
}

fn box_size(values: &[Object]) -> Option<(f32, f32)> {
    if values.len() != 4 {
        return None;
    }
    let nums: Vec<f32> = values.iter().filter_map(extract_number).collect();
    if nums.len() != 4 {
        return None;
    }
    let width = (nums[2] - nums[0]).abs();
    let height = (nums[3] - nums[1]).abs();
    if width > 0.0 && height > 0.0 {
        Some((width, height))
    } else {
        None
    }
}

fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
