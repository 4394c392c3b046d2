#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use pdf_sign::*;
use std::io::Cursor;

/// Renderer with fixed surface sizes, scaled like a real viewer
pub struct FixedRenderer {
    pub sizes: Vec<(f32, f32)>,
    pub scale: f32,
}

impl FixedRenderer {
    pub fn uniform(pages: usize, width: f32, height: f32) -> Self {
        Self {
            sizes: vec![(width, height); pages],
            scale: 1.0,
        }
    }
}

impl PageRenderer for FixedRenderer {
    fn page_count(&self) -> usize {
        self.sizes.len()
    }

    fn surface(&self, page: usize) -> Result<SurfaceSize> {
        let (w, h) = self.sizes.get(page).copied().ok_or(SignError::PageOutOfRange {
            page,
            page_count: self.sizes.len(),
        })?;
        Ok(SurfaceSize::new(w * self.scale, h * self.scale))
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Session on `pages` pages of 1000x1400 px with nothing loaded yet
pub fn session(pages: usize) -> EditingSession<FixedRenderer> {
    EditingSession::with_renderer(
        b"%PDF-1.7 test".to_vec(),
        FixedRenderer::uniform(pages, 1000.0, 1400.0),
        SignOptions::default(),
    )
}

/// Session with a 2:1 signature already loaded
pub async fn signed_session(pages: usize) -> EditingSession<FixedRenderer> {
    let mut session = session(pages);
    let load = session.load_signature(png_bytes(200, 100)).await.unwrap();
    assert_eq!(
        load,
        SignatureLoad::Ready {
            width: 200,
            height: 100
        }
    );
    session
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

pub fn create_test_pdf(num_pages: usize, media_box: [i64; 4]) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(media_box.iter().map(|v| Object::Integer(*v)).collect()),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn pdf_bytes(mut doc: Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}
