pub mod metrics;
pub mod utils;

pub use metrics::{print_metrics, print_summary};
pub use utils::{format_relative_time, truncate};
