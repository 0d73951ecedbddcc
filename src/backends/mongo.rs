use serde::Serialize;
use std::fmt;

/// Operation-specific path value. It is always the last thing on the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathArg {
    /// `mongodump -o <dir>`
    Output(String),
    /// Positional `mongorestore <source>`
    Source(String),
}

impl PathArg {
    fn tokens(&self) -> Vec<String> {
        match self {
            PathArg::Output(dir) if !dir.is_empty() => vec!["-o".to_string(), dir.clone()],
            PathArg::Source(src) if !src.is_empty() => vec![src.clone()],
            _ => Vec::new(),
        }
    }
}

/// Answers collected for one backup or restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationParameters {
    pub host: Option<String>,
    pub port: Option<String>,
    pub database: String,
    pub collection: String,
    pub path: PathArg,
}

/// Program name followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Build the argument list for `program`.
///
/// Flags come in the fixed order host, port, database, collection; a flag is
/// dropped together with its value when the value is empty so the tool falls
/// back to its own default. Values are passed through verbatim.
pub fn assemble(program: &str, params: &OperationParameters) -> CommandLine {
    let mut tokens = vec![program.to_string()];

    let flagged = [
        ("-h", params.host.as_deref()),
        ("-p", params.port.as_deref()),
        ("-d", Some(params.database.as_str())),
        ("-c", Some(params.collection.as_str())),
    ];
    for (flag, value) in flagged {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            tokens.extend([flag.to_string(), value.to_string()]);
        }
    }

    tokens.extend(params.path.tokens());

    CommandLine { tokens }
}
