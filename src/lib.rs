pub mod config;
pub mod flashcards;
pub mod locale;

pub use config::{Config, ConfigError};
pub use locale::{Labels, Locale};
