//! Bookshelf application library
//!
//! The `books` and `author` modules plus helpers to assemble them into a
//! registry and router.

pub mod modules;

use axum::Router;
use bookshelf_kernel::{settings::Settings, ModuleRegistry};

/// Registry holding every application module, in mount order
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Fully layered application router, without binding a socket
pub fn build_app(settings: &Settings) -> Router {
    let registry = build_registry(settings);
    bookshelf_http::build_router(&registry, settings)
}
