//! Core, DOM-free primitives and helpers for the film pages.
pub mod a11y;
pub mod actions;
pub mod display;
pub mod draft;
pub mod feed;
pub mod film;
pub mod html;
pub mod location;
pub mod pagination;
pub mod prefs;
