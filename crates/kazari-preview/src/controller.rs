//! Coalescing preview render controller.
//!
//! The controller turns an arbitrary burst of [`request_update`] calls
//! into at most one in-flight render plus at most one queued follow-up.
//! Three flags drive it:
//!
//! * `ready` — requests before the session is fully initialized are
//!   dropped.
//! * `busy` — a render is in flight. New requests while busy only set
//!   `pending`.
//! * `pending` — at least one request arrived while busy; exactly one
//!   follow-up render runs when the current one finishes, with a fresh
//!   parameter snapshot. Intermediate states are never rendered.
//!
//! The follow-up is an iterative loop in the driver task, not a
//! re-entrant request, so a fast editing session cannot grow the stack
//! or the task count.
//!
//! [`request_update`]: PreviewController::request_update

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kazari_pipeline::{BeautifierOptions, PipelineError, RgbaImage};
use tokio::sync::watch;

use crate::store::ParameterStore;

/// The render seam: pure function of source and options.
type RenderFn =
    Arc<dyn Fn(&RgbaImage, &BeautifierOptions) -> Result<RgbaImage, PipelineError> + Send + Sync>;

/// The three scheduling flags plus the last successful preview.
#[derive(Debug, Default)]
struct State {
    ready: bool,
    busy: bool,
    pending: bool,
    preview: Option<Arc<RgbaImage>>,
}

/// Schedules pipeline renders for one source image, coalescing bursts
/// of parameter edits into single renders.
///
/// Cloning is cheap and shares the same controller.
#[derive(Clone)]
pub struct PreviewController {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<RgbaImage>,
    store: Arc<ParameterStore>,
    render: RenderFn,
    state: Mutex<State>,
    publish: watch::Sender<Option<Arc<RgbaImage>>>,
    runtime: tokio::runtime::Handle,
}

impl PreviewController {
    /// Create a controller for the given source image and parameter
    /// store. The controller starts not-ready; call [`mark_ready`]
    /// once initialization is complete.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime; render work is
    /// dispatched onto the runtime current at construction time.
    ///
    /// [`mark_ready`]: Self::mark_ready
    #[must_use]
    pub fn new(source: RgbaImage, store: Arc<ParameterStore>) -> Self {
        Self::with_render(source, store, Arc::new(kazari_pipeline::render))
    }

    fn with_render(source: RgbaImage, store: Arc<ParameterStore>, render: RenderFn) -> Self {
        let (publish, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                source: Arc::new(source),
                store,
                render,
                state: Mutex::new(State::default()),
                publish,
                runtime: tokio::runtime::Handle::current(),
            }),
        }
    }

    /// Allow renders to start. Requests made before this are dropped.
    pub fn mark_ready(&self) {
        self.inner.lock_state().ready = true;
    }

    /// Ask for the preview to be re-rendered with the current
    /// parameters.
    ///
    /// Non-blocking. If a render is already in flight this only marks
    /// a follow-up as pending; any number of calls while busy collapse
    /// into one follow-up render that snapshots the parameters at its
    /// own start time.
    pub fn request_update(&self) {
        {
            let mut state = self.inner.lock_state();
            if !state.ready {
                return;
            }
            if state.busy {
                state.pending = true;
                return;
            }
            state.busy = true;
        }
        let inner = Arc::clone(&self.inner);
        self.inner.runtime.spawn(async move {
            inner.drive().await;
        });
    }

    /// Subscribe to preview publications.
    ///
    /// The receiver observes the latest preview only; a slow subscriber
    /// skips intermediate frames rather than lagging behind.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<RgbaImage>>> {
        self.inner.publish.subscribe()
    }

    /// The most recently published preview, if any render has
    /// succeeded yet.
    #[must_use]
    pub fn current_preview(&self) -> Option<Arc<RgbaImage>> {
        self.inner.lock_state().preview.clone()
    }

    /// Whether no render is in flight or pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        let state = self.inner.lock_state();
        !state.busy && !state.pending
    }

    /// The source image this controller renders.
    #[must_use]
    pub fn source(&self) -> &Arc<RgbaImage> {
        &self.inner.source
    }

    /// The parameter store renders snapshot from.
    #[must_use]
    pub fn store(&self) -> &Arc<ParameterStore> {
        &self.inner.store
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        // Flag updates cannot tear; a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Render until no follow-up is pending.
    ///
    /// Runs on the runtime; the pipeline itself runs on the blocking
    /// pool. Exactly one driver exists while `busy` is set.
    async fn drive(self: Arc<Self>) {
        loop {
            let snapshot = self.store.snapshot();
            let source = Arc::clone(&self.source);
            let render = Arc::clone(&self.render);
            let started = std::time::Instant::now();
            let result =
                tokio::task::spawn_blocking(move || render(&source, &snapshot)).await;

            match result {
                Ok(Ok(image)) => {
                    log::debug!(
                        "preview render completed: {}x{} in {:.1}ms",
                        image.width(),
                        image.height(),
                        started.elapsed().as_secs_f64() * 1000.0,
                    );
                    let preview = Arc::new(image);
                    self.lock_state().preview = Some(Arc::clone(&preview));
                    self.publish.send_replace(Some(preview));
                }
                // Failed renders keep the previous preview on screen.
                Ok(Err(error)) => log::warn!("preview render failed: {error}"),
                Err(error) => log::warn!("preview render task aborted: {error}"),
            }

            let mut state = self.lock_state();
            if state.pending {
                // Re-arm with a fresh snapshot on the next iteration.
                state.pending = false;
            } else {
                state.busy = false;
                return;
            }
        }
    }
}
