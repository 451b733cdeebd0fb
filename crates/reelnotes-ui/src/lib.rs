#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Reelnotes film page interactions.
//!
//! The server renders every page; this crate enhances it in the browser with
//! like toggling, the rating/review form, paginated review loading and the
//! language/accessibility preferences. Everything that decides *what* happens
//! lives in DOM-free modules (`core`, `features`, `services::http`) so it can
//! be tested natively; the `app` module (wasm32 only) binds those controllers
//! to the real document.

pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod i18n;
pub mod services;
pub mod state;
pub mod surface;
pub mod telemetry;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

pub use config::UiConfig;
pub use error::{ApiError, ConfigError, DraftError, StorageError, TelemetryError};
pub use features::{FollowUp, PageController};
