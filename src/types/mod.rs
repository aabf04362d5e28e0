mod currency;

pub use currency::is_known_currency;

pub type DealId = String;
