pub mod check;
pub mod collect;
pub mod show_config;

pub use check::handle_check;
pub use collect::{handle_collect, CollectStatus};
pub use show_config::handle_show_config;
