//! Outbound service adapters.

pub mod http;

#[cfg(target_arch = "wasm32")]
pub mod fetch;
