//! URL shortener service implementation.
//!
//! This crate wires a repository and a short id generator into the
//! [`Shortener`](smallurl_core::Shortener) workflow. Core types are
//! re-exported from `smallurl_core`.

pub mod service;

pub use service::ShortenerService;
pub use smallurl_core::{
    ExpandResponse, ShortenRequest, ShortenResponse, Shortener, ShortenerError,
};
