mod deal;
mod import_result;

pub use deal::{Deal, RawDeal};
pub use import_result::ImportResult;
