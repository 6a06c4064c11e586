//! Live preview layer for the kazari beautification pipeline.
//!
//! [`kazari_pipeline`] is a pure function; this crate wraps it in the
//! machinery an interactive frontend needs:
//!
//! * [`ParameterStore`] — thread-safe, snapshot-able beautification
//!   parameters.
//! * [`PreviewController`] — coalesces bursts of update requests into
//!   single renders on the tokio blocking pool, publishing results
//!   through a watch channel.
//! * [`PreviewSession`] — ties a source image, a store, and a
//!   controller together and kicks off the initial render.
//!
//! No frontend is included; any UI (or none, as in the `kazari` CLI)
//! can sit on top.

pub mod controller;
pub mod session;
pub mod store;

pub use controller::PreviewController;
pub use session::{PreviewError, PreviewSession};
pub use store::ParameterStore;
