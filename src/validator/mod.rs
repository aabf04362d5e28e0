mod deal_validator;

pub use deal_validator::{DealValidator, ValidationFailure};
