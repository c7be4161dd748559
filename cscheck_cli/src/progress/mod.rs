//! Progress reporting module for the CLI

pub mod renderer;
pub mod utils;

pub use renderer::{ProgressRenderer, StatusLines};
pub use utils::{format_bytes, format_throughput, throughput_mbps};
