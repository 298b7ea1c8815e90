//! Interactive interview that collects a generator configuration.
//!
//! A fixed sequence of {question, validator, re-ask-on-failure} steps over
//! any `BufRead`/`Write` pair. The wizard only collects and validates
//! answers; document construction lives in the builder, which keeps the core
//! testable without a terminal.

use crate::source::{AuthMode, DataSource, SourceKind};
use crate::validate::{Endpoint, SourceCount, SourceName, ValidationError, WorkflowName};
use colored::Colorize;
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("IO error during interview: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended before the interview completed")]
    Eof,
}

/// Everything the interview produces; input to the document builder.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub workflow_name: WorkflowName,
    pub sources: Vec<DataSource>,
    pub include_synthesis: bool,
}

impl GeneratorConfig {
    /// Number of AI agent tasks the document will contain.
    pub fn agent_count(&self) -> usize {
        self.sources.len() + usize::from(self.include_synthesis)
    }

    /// Secret names the engine must provide, in source order.
    pub fn required_secrets(&self) -> Vec<String> {
        self.sources
            .iter()
            .filter_map(DataSource::secret_name)
            .collect()
    }
}

pub struct Wizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the full interview.
    pub fn run(&mut self) -> Result<GeneratorConfig, WizardError> {
        let workflow_name =
            self.ask_validated("Workflow name", "my_data_pipeline", |raw| WorkflowName::new(raw))?;
        let count =
            self.ask_validated("How many data sources? (2-5)", "3", |raw| SourceCount::new(raw))?;
        let include_synthesis = self.confirm("Include synthesis/decision agent?", true)?;

        let mut sources: Vec<DataSource> = Vec::with_capacity(count.get());
        for i in 1..=count.get() {
            writeln!(
                self.output,
                "\n--- Data Source {i} of {} ---",
                count.get()
            )?;

            let kind = self.ask_choice(
                &format!("Source {i} type:"),
                &SourceKind::ALL.map(SourceKind::label),
                SourceKind::parse_choice,
            )?;

            let name = loop {
                let candidate = self.ask_validated(
                    &format!("Source {i} name"),
                    &format!("source_{i}"),
                    |raw| SourceName::new(raw),
                )?;
                if sources.iter().any(|s| s.name == candidate) {
                    self.report(&format!(
                        "source name '{candidate}' is already taken (names are compared after sanitization)"
                    ))?;
                    continue;
                }
                break candidate;
            };

            let endpoint = self.ask_validated(
                &format!("Source {i} endpoint"),
                "https://api.example.com/data",
                |raw| Endpoint::new(raw),
            )?;

            let auth = self.ask_choice(
                &format!("Source {i} authentication:"),
                &AuthMode::ALL.map(AuthMode::label),
                AuthMode::parse_choice,
            )?;

            sources.push(DataSource {
                name,
                kind,
                endpoint,
                auth,
            });
        }

        Ok(GeneratorConfig {
            workflow_name,
            sources,
            include_synthesis,
        })
    }

    /// Ask one question, re-asking until the validator accepts the answer.
    fn ask_validated<T>(
        &mut self,
        prompt: &str,
        default: &str,
        validate: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T, WizardError> {
        loop {
            let raw = self.ask(prompt, default)?;
            match validate(&raw) {
                Ok(value) => return Ok(value),
                Err(err) => self.report(&err)?,
            }
        }
    }

    /// Present a numbered list and re-ask until the answer resolves.
    fn ask_choice<T>(
        &mut self,
        header: &str,
        labels: &[&str],
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, WizardError> {
        writeln!(self.output, "{header}")?;
        for (i, label) in labels.iter().enumerate() {
            writeln!(self.output, "  {}) {label}", i + 1)?;
        }
        loop {
            let raw = self.ask("Choice", "1")?;
            match parse(&raw) {
                Some(value) => return Ok(value),
                None => self.report(&format!("'{raw}' is not one of the listed options"))?,
            }
        }
    }

    /// Yes/no question with a default.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, WizardError> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "{prompt} [{hint}]: ")?;
            self.output.flush()?;
            let raw = self.read_line()?;
            match raw.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => self.report(&format!("please answer y or n, not '{other}'"))?,
            }
        }
    }

    /// One prompt/answer exchange; empty input takes the default.
    fn ask(&mut self, prompt: &str, default: &str) -> Result<String, WizardError> {
        write!(self.output, "{prompt} [{default}]: ")?;
        self.output.flush()?;
        let raw = self.read_line()?;
        let trimmed = raw.trim();
        Ok(if trimmed.is_empty() {
            default.to_string()
        } else {
            trimmed.to_string()
        })
    }

    fn read_line(&mut self) -> Result<String, WizardError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(WizardError::Eof);
        }
        Ok(line)
    }

    fn report(&mut self, message: &dyn std::fmt::Display) -> Result<(), WizardError> {
        writeln!(self.output, "{} {message}", "✗".red())?;
        Ok(())
    }
}
