use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::fmt;
use std::io::Write;
use std::path::Path;

use super::prompth::{Field, Prompter, QuestionSet};
use crate::backends::{assemble, CommandLine, OperationParameters, PathArg, ProcessRunner};
use crate::core::{dumpdir, Config, IoStreams, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Backup,
    Restore,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Backup, Action::Restore];

    pub fn label(&self) -> &'static str {
        match self {
            Action::Backup => "Backup",
            Action::Restore => "Restore",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One interactive run: pick an action, collect its parameters, run the tool.
pub struct Dispatcher<'a> {
    config: &'a Config,
    cwd: &'a Path,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a Config, cwd: &'a Path) -> Self {
        Self { config, cwd }
    }

    pub fn run(
        &self,
        prompter: &mut dyn Prompter,
        runner: &mut dyn ProcessRunner,
        io: &mut IoStreams,
    ) -> Result<Status> {
        if self.config.banner {
            writeln!(
                io.stdout,
                "{}",
                "Welcome to MOGD! A backup and restore solution for MongoDB".green()
            )?;
        }

        let action = self.select_action(prompter)?;
        log::info!("selected action: {}", action);

        let command = self.prepare(action, prompter)?;
        log::info!("assembled command: {}", command);

        if self.config.dry_run {
            return self.print_plan(&command, io);
        }

        self.execute(&command, runner, io)
    }

    fn select_action(&self, prompter: &mut dyn Prompter) -> Result<Action> {
        let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
        let index = prompter.select("Please select an action", &labels, 0)?;
        Action::ALL
            .get(index)
            .copied()
            .with_context(|| format!("invalid action index {}", index))
    }

    /// Collect the parameters for `action` and assemble its command line.
    pub fn prepare(&self, action: Action, prompter: &mut dyn Prompter) -> Result<CommandLine> {
        let (program, questions) = match action {
            Action::Backup => (
                self.config.mongodump.as_str(),
                QuestionSet::backup(self.config, self.cwd),
            ),
            Action::Restore => {
                let defaults = dumpdir::infer_defaults_in(self.cwd, &self.config.dump_dir);
                match &defaults {
                    Some(d) => log::info!(
                        "restore defaults: database='{}' collection='{}' source='{}'",
                        d.database,
                        d.collection,
                        d.source_path.display()
                    ),
                    None => log::info!(
                        "no restore defaults found under {}",
                        self.cwd.join(&self.config.dump_dir).display()
                    ),
                }
                (
                    self.config.mongorestore.as_str(),
                    QuestionSet::restore(self.config).with_defaults(defaults.as_ref()),
                )
            }
        };

        let mut answers = questions.ask(prompter)?;
        let path = match action {
            Action::Backup => PathArg::Output(answers.take(Field::Output)),
            Action::Restore => PathArg::Source(answers.take(Field::Source)),
        };
        let params = OperationParameters {
            host: Some(answers.take(Field::Host)),
            port: Some(answers.take(Field::Port)),
            database: answers.take(Field::Database),
            collection: answers.take(Field::Collection),
            path,
        };

        Ok(assemble(program, &params))
    }

    fn print_plan(&self, command: &CommandLine, io: &mut IoStreams) -> Result<Status> {
        let plan = json!({
            "program": command.program(),
            "args": command.args(),
            "display": command.to_string(),
        });
        writeln!(io.stdout, "{}", serde_json::to_string_pretty(&plan)?)?;
        Ok(Status::ok())
    }

    fn execute(
        &self,
        command: &CommandLine,
        runner: &mut dyn ProcessRunner,
        io: &mut IoStreams,
    ) -> Result<Status> {
        writeln!(io.stdout)?;
        io.stdout.flush()?;

        match runner.run(command) {
            Ok(()) => {
                writeln!(io.stdout, "{}", "BYEE".green())?;
                Ok(Status::ok())
            }
            Err(e) => {
                log::warn!("{} failed: {}", command.program(), e);
                writeln!(io.stderr, "{}", e.to_string().red())?;
                Ok(Status::err(e.exit_code(), e.to_string()))
            }
        }
    }
}
