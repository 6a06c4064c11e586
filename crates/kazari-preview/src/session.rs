//! A beautification session: one source image, its parameters, and a
//! live preview.

use std::path::Path;
use std::sync::Arc;

use kazari_pipeline::{BeautifierOptions, PipelineError, RgbaImage};
use tokio::sync::watch;

use crate::controller::PreviewController;
use crate::store::ParameterStore;

/// Errors raised while opening a session.
///
/// Load failures are fatal at session open; once a session exists,
/// render failures are logged and the previous preview is kept instead.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The source image could not be loaded or contained no pixels.
    #[error("failed to load source image: {0}")]
    Load(#[from] PipelineError),
}

/// Owns the parameter store and preview controller for one source
/// image, and kicks off the initial render.
pub struct PreviewSession {
    store: Arc<ParameterStore>,
    controller: PreviewController,
}

impl PreviewSession {
    /// Start a session from an already-decoded source image.
    ///
    /// The initial render with `options` is requested before this
    /// returns; subscribe to observe it.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Load`] for a zero-size source.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn from_image(
        source: RgbaImage,
        options: BeautifierOptions,
    ) -> Result<Self, PreviewError> {
        if source.width() == 0 || source.height() == 0 {
            return Err(PreviewError::Load(PipelineError::EmptyInput));
        }
        let store = Arc::new(ParameterStore::new(options));
        let controller = PreviewController::new(source, Arc::clone(&store));
        controller.mark_ready();
        controller.request_update();
        Ok(Self { store, controller })
    }

    /// Start a session by loading the source image from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Load`] if the file cannot be read or
    /// decoded, or decodes to an empty image.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn open(path: &Path, options: BeautifierOptions) -> Result<Self, PreviewError> {
        let source = kazari_pipeline::load_image(path)?;
        Self::from_image(source, options)
    }

    /// The session's parameter store. Edits do not trigger renders;
    /// call [`request_update`] after a batch of edits.
    ///
    /// [`request_update`]: Self::request_update
    #[must_use]
    pub fn store(&self) -> &Arc<ParameterStore> {
        &self.store
    }

    /// The underlying preview controller.
    #[must_use]
    pub const fn controller(&self) -> &PreviewController {
        &self.controller
    }

    /// Request a preview re-render with the current parameters.
    pub fn request_update(&self) {
        self.controller.request_update();
    }

    /// Subscribe to preview publications.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<RgbaImage>>> {
        self.controller.subscribe()
    }

    /// The most recently rendered preview, if any.
    #[must_use]
    pub fn current_preview(&self) -> Option<Arc<RgbaImage>> {
        self.controller.current_preview()
    }

    /// The source image this session beautifies.
    #[must_use]
    pub fn source(&self) -> &Arc<RgbaImage> {
        self.controller.source()
    }
}
