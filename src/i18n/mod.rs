mod resolver;

pub use resolver::{LocaleResolver, MessageResolver, DEFAULT_LOCALE};
