mod health;
mod url;

pub use health::health_handler;
pub use url::{expand_url_handler, redirect_handler, shorten_url_handler};
