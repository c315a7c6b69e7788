pub mod config;

pub use config::{load_config, resolve_config_path, Config, ConfigOverrides, OutputFiles};
