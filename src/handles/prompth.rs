use anyhow::{anyhow, Context, Result};
use dialoguer::{Input, Select};
use std::collections::HashMap;
use std::path::Path;

use crate::core::config::Config;
use crate::core::dumpdir::InferredDefaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Host,
    Port,
    Database,
    Collection,
    Output,
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub field: Field,
    pub message: &'static str,
    pub default: Option<String>,
    /// Error shown when a required answer is empty. `None` accepts anything.
    pub required: Option<&'static str>,
}

impl Question {
    fn new(field: Field, message: &'static str) -> Self {
        Self {
            field,
            message,
            default: None,
            required: None,
        }
    }

    fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    /// Final answer for raw operator input: empty input takes the default,
    /// then required questions reject an empty result.
    pub fn resolve(&self, input: &str) -> Result<String, &'static str> {
        let answer = if input.trim().is_empty() {
            self.default.clone().unwrap_or_default()
        } else {
            input.to_string()
        };

        match self.required {
            Some(message) if answer.trim().is_empty() => Err(message),
            _ => Ok(answer),
        }
    }

    pub fn validate(&self, input: &str) -> Result<(), &'static str> {
        self.resolve(input).map(|_| ())
    }
}

/// Ordered questions for one run. Built fresh every time; never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    fn connection(config: &Config) -> Vec<Question> {
        vec![
            Question::new(Field::Host, "Hostname").with_default(config.host.clone()),
            Question::new(Field::Port, "Port").with_default(config.port.clone()),
            Question::new(Field::Database, "Database name")
                .required("Please provide a database name"),
            Question::new(Field::Collection, "Collection name")
                .required("Please provide a collection name"),
        ]
    }

    pub fn backup(config: &Config, cwd: &Path) -> Self {
        let mut questions = Self::connection(config);
        let output = cwd.join(&config.dump_dir);
        questions.push(
            Question::new(Field::Output, "Output directory")
                .with_default(output.display().to_string()),
        );
        Self { questions }
    }

    pub fn restore(config: &Config) -> Self {
        let mut questions = Self::connection(config);
        questions.push(Question::new(Field::Source, "Source directory"));
        Self { questions }
    }

    /// Prefill database, collection and source from an existing dump. The
    /// inferred names are trusted, so those questions stop being required.
    pub fn with_defaults(mut self, defaults: Option<&InferredDefaults>) -> Self {
        let Some(defaults) = defaults else {
            return self;
        };

        for question in &mut self.questions {
            match question.field {
                Field::Database => {
                    question.default = Some(defaults.database.clone());
                    question.required = None;
                }
                Field::Collection => {
                    question.default = Some(defaults.collection.clone());
                    question.required = None;
                }
                Field::Source => {
                    question.default = Some(defaults.source_path.display().to_string());
                }
                _ => {}
            }
        }
        self
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, field: Field) -> Option<&Question> {
        self.questions.iter().find(|q| q.field == field)
    }

    /// Ask every question in order.
    pub fn ask(&self, prompter: &mut dyn Prompter) -> Result<Answers> {
        let mut answers = HashMap::new();
        for question in &self.questions {
            let answer = prompter.input(question)?;
            answers.insert(question.field, answer);
        }
        Ok(Answers(answers))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Answers(HashMap<Field, String>);

impl Answers {
    /// Answer for `field`, empty when the question was not asked.
    pub fn get(&self, field: Field) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn take(&mut self, field: Field) -> String {
        self.0.remove(&field).unwrap_or_default()
    }
}

/// Source of operator input.
pub trait Prompter {
    /// Pick one of `items`; returns its index.
    fn select(&mut self, message: &str, items: &[&str], default: usize) -> Result<usize>;

    /// Ask until the answer passes the question's validation; returns the
    /// resolved answer.
    fn input(&mut self, question: &Question) -> Result<String>;
}

/// Interactive prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, items: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact()
            .context("failed to read selection")
    }

    fn input(&mut self, question: &Question) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(question.message)
            .allow_empty(true);
        if let Some(default) = &question.default {
            input = input.default(default.clone());
        }

        let check = question.clone();
        let raw = input
            .validate_with(move |answer: &String| check.validate(answer))
            .interact_text()
            .with_context(|| format!("failed to read {}", question.message.to_lowercase()))?;

        question.resolve(&raw).map_err(|message| anyhow!(message))
    }
}
