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
#![allow(clippy::missing_panics_doc)]

//! Shared helpers for the controller integration suites.
//! Layout: mocks.rs (scripted transport, recording surface, memory store),
//! fixtures.rs (canned API payloads and controller assembly).

pub mod fixtures;
pub mod mocks;
