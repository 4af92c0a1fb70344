//! tubedigest: summarize YouTube comment threads.
//!
//! Drives a headless Chromium instance to a watch page, collects comment
//! text out of the continuously-mutating DOM (including lazily-loaded
//! comments and hidden reply threads), and hands the deduplicated list to
//! a configured AI provider for summarization. The result is rendered
//! into an in-page overlay and reported on stdout.
//!
//! The collection engine is generic over [`surface::CommentSurface`], so
//! the same locator/expander/loader/monitor logic runs against a live
//! page, a saved HTML snapshot, or a test fixture.

pub mod browser;
pub mod cleanup;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod expander;
pub mod loader;
pub mod locator;
pub mod navigation;
pub mod panel;
pub mod sanitize;
pub mod session;
pub mod settings;
pub mod summarize;
pub mod surface;
pub mod utils;

pub use cleanup::CleanupRegistry;
pub use config::DigestConfig;
pub use coordinator::Coordinator;
pub use error::{DigestError, DigestResult, SurfaceError};
pub use expander::ReplyExpander;
pub use loader::load_deep;
pub use locator::{ContainerCache, locate};
pub use navigation::{NavSignal, NavigationMonitor, signal_channel};
pub use panel::{OverlayPanel, StatusPanel};
pub use sanitize::sanitize;
pub use session::{CollectMode, CollectionSession, RunReport};
pub use settings::Settings;
pub use summarize::{Provider, ProviderKind, Summarizer};
pub use surface::{CdpSurface, CommentSurface, ControlQuery, SnapshotSurface};
