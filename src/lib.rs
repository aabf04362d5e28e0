pub mod api;
pub mod config;
pub mod engine;
pub mod i18n;
pub mod models;
pub mod parser;
pub mod storage;
pub mod types;
pub mod validator;

rust_i18n::i18n!("locales", fallback = "en");
