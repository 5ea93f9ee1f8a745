//! Confirmation prompts before files are written.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;

/// Asks the user yes/no questions.
pub trait Prompter {
    fn confirm(&self, question: &str) -> bool;
}

/// Reads answers from stdin.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, question: &str) -> bool {
        let stdin = io::stdin();
        loop {
            print!("{} [y/n] ", question.bold());
            if io::stdout().flush().is_err() {
                return false;
            }
            let mut answer = String::new();
            match stdin.lock().read_line(&mut answer) {
                // EOF counts as no
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            match parse_answer(&answer) {
                Some(yes) => return yes,
                None => println!("Please answer y or n"),
            }
        }
    }
}

/// Answers yes to everything (`--yes`).
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
