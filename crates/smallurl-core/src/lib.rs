//! Core types and traits for the smallurl shortener.
//!
//! This crate provides the types shared by the generator, the storage
//! backends, the shortener service and the HTTP gateway.

pub mod address;
pub mod base62;
pub mod error;
pub mod length;
pub mod repository;
pub mod short_id;
pub mod shortener;

pub use address::{BaseUrl, LongUrl};
pub use error::{Base62Error, Result, ShortenerError, StorageError, StorageResult};
pub use length::LengthClass;
pub use repository::{ReadRepository, Repository, UrlRecord};
pub use short_id::ShortId;
pub use shortener::{ExpandResponse, ShortenRequest, ShortenResponse, Shortener};
