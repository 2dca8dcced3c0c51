//! Helper functions shared by the content index and the components

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
