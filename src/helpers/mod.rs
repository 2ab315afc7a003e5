//! Helper functions shared by templates, the generator and the server

mod date;
mod url;

pub use date::*;
pub use url::*;
