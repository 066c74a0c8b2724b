//! CLI operation handlers.
//!
//! - [`digest`]: Fetch a pull request's discussion and render the digest
//! - [`output`]: Write the rendered document to stdout or a file

pub mod digest;
pub mod output;
