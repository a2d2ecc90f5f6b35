use std::collections::VecDeque;

use colored::Colorize;
use inquire::Text;

use crate::error::AppError;

/// Source of answers to interactive questions
pub trait Prompter {
    /// Asks `message` and returns the trimmed answer
    fn ask(&mut self, message: &str) -> Result<String, AppError>;
}

/// Prompts on the terminal
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn ask(&mut self, message: &str) -> Result<String, AppError> {
        let input: String = Text::new(&format!("{}", message.blue())).prompt()?;
        Ok(input.trim().to_string())
    }
}

/// Replays queued answers, for scripted runs and tests
#[derive(Debug, Default)]
pub struct CannedPrompter {
    answers: VecDeque<String>,
}

impl CannedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CannedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of answers not asked for yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for CannedPrompter {
    fn ask(&mut self, message: &str) -> Result<String, AppError> {
        self.answers
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or_else(|| AppError::NoInput(message.to_string()))
    }
}
