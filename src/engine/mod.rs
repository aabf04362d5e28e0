mod errors;
mod import_engine;
mod upload;

pub use errors::ImportError;
pub use import_engine::ImportEngine;
pub use upload::{Upload, ACCEPTED_CONTENT_TYPES};
