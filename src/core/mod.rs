pub mod config;
pub mod dumpdir;
pub mod status;

pub use config::{Config, ConfigArgs};
pub use dumpdir::{infer_defaults, infer_defaults_in, InferredDefaults};
pub use status::Status;

use std::io::Write;

/// Operator-facing output of a run, separated from the prompts so runs can be
/// captured in tests.
pub struct IoStreams<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}
