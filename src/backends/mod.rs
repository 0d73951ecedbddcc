use std::io;
use std::process::{Command, Stdio};
use std::time::Instant;
use thiserror::Error;

pub mod mongo;

pub use mongo::{assemble, CommandLine, OperationParameters, PathArg};

/// Why a tool run did not succeed.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{program}: command not found")]
    NotFound { program: String },

    #[error("{program}: permission denied")]
    PermissionDenied { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with status {code}")]
    Failed { program: String, code: i32 },

    #[error("{program} was terminated by a signal")]
    Terminated { program: String },
}

impl ToolError {
    fn from_spawn(program: &str, err: io::Error) -> Self {
        let program = program.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => ToolError::NotFound { program },
            io::ErrorKind::PermissionDenied => ToolError::PermissionDenied { program },
            _ => ToolError::Spawn { program, source: err },
        }
    }

    /// Shell-style exit code for the failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::NotFound { .. } => 127,
            ToolError::PermissionDenied { .. } => 126,
            ToolError::Spawn { .. } => 1,
            ToolError::Failed { code, .. } => *code,
            ToolError::Terminated { .. } => 1,
        }
    }
}

/// Runs an assembled command to completion.
pub trait ProcessRunner {
    fn run(&mut self, command: &CommandLine) -> Result<(), ToolError>;
}

/// Spawns the real tool with inherited stdio so its progress output reaches
/// the operator directly. Arguments are passed as an array, never through a
/// shell. Blocks until the child exits; there is no timeout.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, command: &CommandLine) -> Result<(), ToolError> {
        let program = command.program();
        let start = Instant::now();

        let status = Command::new(program)
            .args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ToolError::from_spawn(program, e))?;

        log::info!(
            "{} finished with {} after {}ms",
            program,
            status,
            start.elapsed().as_millis()
        );

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(ToolError::Failed {
                program: program.to_string(),
                code,
            }),
            None => Err(ToolError::Terminated {
                program: program.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(program: &str) -> CommandLine {
        let params = OperationParameters {
            host: None,
            port: None,
            database: String::new(),
            collection: String::new(),
            path: PathArg::Source(String::new()),
        };
        assemble(program, &params)
    }

    #[test]
    fn test_exit_codes() {
        let not_found = ToolError::NotFound { program: "mongodump".to_string() };
        assert_eq!(not_found.exit_code(), 127);
        assert_eq!(not_found.to_string(), "mongodump: command not found");

        let denied = ToolError::PermissionDenied { program: "mongodump".to_string() };
        assert_eq!(denied.exit_code(), 126);

        let failed = ToolError::Failed { program: "mongorestore".to_string(), code: 2 };
        assert_eq!(failed.exit_code(), 2);
        assert_eq!(failed.to_string(), "mongorestore exited with status 2");
    }

    #[test]
    fn test_spawn_error_mapping() {
        let err = ToolError::from_spawn("x", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ToolError::NotFound { .. }));

        let err = ToolError::from_spawn("x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ToolError::PermissionDenied { .. }));

        let err = ToolError::from_spawn("x", io::Error::from(io::ErrorKind::Other));
        assert!(matches!(err, ToolError::Spawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_program() {
        let result = SystemRunner.run(&bare("mogd-test-no-such-program"));
        assert!(matches!(result, Err(ToolError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_program() {
        assert!(SystemRunner.run(&bare("true")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program() {
        match SystemRunner.run(&bare("false")) {
            Err(ToolError::Failed { program, code }) => {
                assert_eq!(program, "false");
                assert_eq!(code, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
