//! Project-level configuration (`.vaultr.toml`).

pub mod settings;

pub use settings::Settings;
