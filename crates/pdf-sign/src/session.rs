//! One editing session per loaded document
//!
//! The session owns everything a user builds up while signing a document:
//! the document bytes, the signature image, the overlays and their
//! placements. Loading another document means building a new session.

use crate::options::SignOptions;
use crate::overlay::{OverlayController, OverlayState};
use crate::registry::PlacementRegistry;
use crate::render::{LopdfPageRenderer, PageRenderer, load_pdf_bytes};
use crate::signature::{SignatureLoad, SignatureState};
use crate::submit::{SubmissionRequest, UploadService};
use crate::types::*;

pub struct EditingSession<R: PageRenderer> {
    document: Vec<u8>,
    renderer: R,
    signature: SignatureState,
    registry: PlacementRegistry,
    overlays: OverlayController,
    options: SignOptions,
}

impl EditingSession<LopdfPageRenderer> {
    /// Parse a PDF and start a session on it
    pub async fn open(document: Vec<u8>, options: SignOptions) -> Result<Self> {
        options.validate()?;
        if document.is_empty() {
            return Err(SignError::NoDocument);
        }

        let parsed = load_pdf_bytes(document.clone()).await?;
        let renderer = LopdfPageRenderer::new(&parsed)?.with_scale(options.render_scale);
        log::info!("Opened document with {} pages", renderer.page_count());

        Ok(Self::with_renderer(document, renderer, options))
    }
}

impl<R: PageRenderer> EditingSession<R> {
    pub fn with_renderer(document: Vec<u8>, renderer: R, options: SignOptions) -> Self {
        Self {
            document,
            renderer,
            signature: SignatureState::new(),
            registry: PlacementRegistry::new(),
            overlays: OverlayController::new(options.geometry()),
            options,
        }
    }

    pub fn page_count(&self) -> usize {
        self.renderer.page_count()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn options(&self) -> &SignOptions {
        &self.options
    }

    pub fn signature(&self) -> &SignatureState {
        &self.signature
    }

    pub fn registry(&self) -> &PlacementRegistry {
        &self.registry
    }

    pub fn overlays(&self) -> &OverlayController {
        &self.overlays
    }

    pub fn overlay_state(&self, page: usize) -> OverlayState {
        self.overlays.state(page)
    }

    /// Current placements, in no particular order
    pub fn placements(&self) -> Vec<Placement> {
        self.registry.list()
    }

    /// Attach a signature image. Existing overlays keep their geometry.
    ///
    /// Loading empty bytes behaves like `clear_signature`.
    pub async fn load_signature(&mut self, bytes: Vec<u8>) -> Result<SignatureLoad> {
        let load = self.signature.load(bytes).await?;
        if load == SignatureLoad::Cleared {
            self.clear_signature();
        }
        Ok(load)
    }

    /// Detach the signature; its overlays and placements go with it.
    pub fn clear_signature(&mut self) {
        self.signature.clear();
        self.overlays.clear(&mut self.registry);
        log::info!("Signature cleared, all placements removed");
    }

    /// Put a signature overlay on a page, replacing any overlay already there.
    pub fn add_overlay(&mut self, page: usize) -> Result<Placement> {
        if !self.signature.is_loaded() {
            return Err(SignError::NoSignatureLoaded);
        }
        let surface = self.renderer.surface(page)?;
        self.overlays.create(
            page,
            surface,
            self.signature.aspect_ratio(),
            &mut self.registry,
        )
    }

    pub fn remove_overlay(&mut self, page: usize) {
        self.overlays.remove(page, &mut self.registry);
    }

    /// Feed a gesture event to a page's overlay.
    ///
    /// The page surface is looked up fresh for each event so a commit always
    /// normalizes against the size the page is drawn at right now.
    pub fn handle_gesture(&mut self, page: usize, event: GestureEvent) -> Result<Option<Placement>> {
        if self.overlays.overlay(page).is_none() {
            return Ok(None);
        }
        let surface = self.renderer.surface(page)?;
        self.overlays
            .handle_gesture(page, event, surface, &mut self.registry)
    }

    /// Redraw at another display scale; overlays follow their placements.
    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SignError::Config(format!("Invalid display scale {}", scale)));
        }
        self.renderer.set_scale(scale);
        self.options.render_scale = scale;

        let renderer = &self.renderer;
        self.overlays
            .rescale(&self.registry, |page| renderer.surface(page))
    }

    /// Assemble the request for the backend
    pub fn submission(&self, filter: FilterMode) -> SubmissionRequest {
        SubmissionRequest {
            document: self.document.clone(),
            signature: self.signature.bytes().map(<[u8]>::to_vec),
            placements: self.registry.list(),
            filter,
        }
    }

    /// Validate and send the current placements.
    ///
    /// Nothing in the session changes, whatever the outcome.
    pub async fn submit<U: UploadService>(&self, service: &U, filter: FilterMode) -> Result<Vec<u8>> {
        let request = self.submission(filter);
        request.validate(self.page_count())?;
        log::info!(
            "Submitting {} placement(s) with filter {}",
            request.placements.len(),
            filter.as_str()
        );
        service.submit(&request).await
    }
}
