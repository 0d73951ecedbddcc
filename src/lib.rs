pub mod backends;
pub mod core;
pub mod handles;

// Re-export commonly used items
pub use crate::backends::{assemble, CommandLine, OperationParameters, PathArg, ProcessRunner, SystemRunner};
pub use crate::core::{infer_defaults, Config, InferredDefaults, Status};
pub use crate::handles::{Action, Dispatcher};
