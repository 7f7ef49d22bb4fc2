use std::io::{self, BufRead, Write};

/// Synchronous yes/no confirmation, injected into the default action
/// callbacks so they can run headless (CLI `--yes`) or under test.
pub trait Prompter {
    fn confirm(&self, message: &str) -> bool;
}

/// Interactive prompter: prints the message and reads y/n from stdin.
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => matches!(line.trim(), "y" | "Y" | "yes" | "Yes"),
            Err(e) => {
                eprintln!("Warning: could not read confirmation: {}", e);
                false
            }
        }
    }
}

/// Fixed-answer prompter for headless runs and tests.
pub struct AutoPrompter {
    pub answer: bool,
}

impl Prompter for AutoPrompter {
    fn confirm(&self, _message: &str) -> bool {
        self.answer
    }
}
