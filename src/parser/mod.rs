mod csv_parser;
mod errors;
mod schema;

pub use csv_parser::parse_deals;
pub use errors::ParseError;
pub use schema::{ColumnSpec, DEAL_SCHEMA};
