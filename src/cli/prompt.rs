//! Operator input. The interactive prompter drives dialoguer widgets and a
//! rustyline editor; the script prompter consumes one stdin line per prompt.

use std::io::{self, BufRead, Write};

use crossterm::{cursor, execute, terminal};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use rustyline::{error::ReadlineError, DefaultEditor};

use super::core::CommandError;

/// Outcome of a menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Item(usize),
    /// Operator backed out of the menu (Esc).
    Back,
    /// Input that names no entry; carries the raw text.
    Invalid(String),
}

pub trait Prompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Choice, CommandError>;
    /// Free text; an empty string means the operator just pressed Enter.
    fn text(&mut self, prompt: &str) -> Result<String, CommandError>;
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CommandError>;
    fn pause(&mut self) -> Result<(), CommandError>;
    fn clear_screen(&mut self) -> Result<(), CommandError>;
}

pub struct InteractivePrompter {
    theme: ColorfulTheme,
    editor: DefaultEditor,
    clear_screen: bool,
}

impl InteractivePrompter {
    pub fn new(clear_screen: bool) -> Result<Self, CommandError> {
        Ok(Self {
            theme: ColorfulTheme::default(),
            editor: DefaultEditor::new()?,
            clear_screen,
        })
    }
}

impl Prompter for InteractivePrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Choice, CommandError> {
        let picked = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?;
        Ok(picked.map_or(Choice::Back, Choice::Item))
    }

    fn text(&mut self, prompt: &str) -> Result<String, CommandError> {
        match self.editor.readline(&format!("{prompt}: ")) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(trimmed.to_string())
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(CommandError::ExitRequested)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn pause(&mut self) -> Result<(), CommandError> {
        self.text("Press Enter to continue").map(|_| ())
    }

    fn clear_screen(&mut self) -> Result<(), CommandError> {
        if self.clear_screen {
            execute!(
                io::stdout(),
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
        }
        Ok(())
    }
}

/// Reads answers line by line. End of input ends the session.
pub struct ScriptPrompter<R> {
    reader: R,
    echo: bool,
}

impl ScriptPrompter<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> ScriptPrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, echo: true }
    }

    /// Stops prompts from being written to stdout.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    fn next_line(&mut self, prompt: &str) -> Result<String, CommandError> {
        if self.echo {
            let mut stdout = io::stdout();
            write!(stdout, "{prompt}: ")?;
            stdout.flush()?;
        }
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            tracing::debug!(prompt, "script input exhausted");
            return Err(CommandError::ExitRequested);
        }
        let answer = line.trim().to_string();
        if self.echo {
            println!("{answer}");
        }
        Ok(answer)
    }
}

impl<R: BufRead> Prompter for ScriptPrompter<R> {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Choice, CommandError> {
        if self.echo {
            for (index, item) in items.iter().enumerate() {
                println!("{}. {}", index + 1, item);
            }
        }
        let answer = self.next_line(prompt)?;
        Ok(parse_choice(&answer, items))
    }

    fn text(&mut self, prompt: &str) -> Result<String, CommandError> {
        self.next_line(prompt)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = self.next_line(&format!("{prompt} [{hint}]"))?;
        Ok(parse_confirmation(&answer, default))
    }

    fn pause(&mut self) -> Result<(), CommandError> {
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), CommandError> {
        Ok(())
    }
}

/// Accepts a 1-based menu number or an entry label in any case.
pub fn parse_choice(answer: &str, items: &[&str]) -> Choice {
    let answer = answer.trim();
    if let Ok(number) = answer.parse::<usize>() {
        if (1..=items.len()).contains(&number) {
            return Choice::Item(number - 1);
        }
    }
    items
        .iter()
        .position(|item| item.eq_ignore_ascii_case(answer))
        .map_or_else(|| Choice::Invalid(answer.to_string()), Choice::Item)
}

/// `y`, `yes`, `s` and `si` confirm; a blank answer takes the default.
pub fn parse_confirmation(answer: &str, default: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" | "s" | "si" => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ITEMS: [&str; 3] = ["Sales", "Products", "Exit"];

    #[test]
    fn choices_parse_numbers_and_labels() {
        assert_eq!(parse_choice("2", &ITEMS), Choice::Item(1));
        assert_eq!(parse_choice(" exit ", &ITEMS), Choice::Item(2));
        assert_eq!(parse_choice("0", &ITEMS), Choice::Invalid("0".into()));
        assert_eq!(parse_choice("9", &ITEMS), Choice::Invalid("9".into()));
        assert_eq!(parse_choice("", &ITEMS), Choice::Invalid(String::new()));
    }

    #[test]
    fn confirmation_accepts_yes_words() {
        assert!(parse_confirmation("S", false));
        assert!(parse_confirmation("yes", false));
        assert!(!parse_confirmation("n", true));
        assert!(!parse_confirmation("maybe", true));
        assert!(parse_confirmation("", true));
    }

    #[test]
    fn script_prompter_reads_lines_until_exhausted() {
        let mut prompter = ScriptPrompter::new(Cursor::new("1\nTea\n\ny\n")).quiet();
        assert_eq!(prompter.select("Menu", &ITEMS).unwrap(), Choice::Item(0));
        assert_eq!(prompter.text("Name").unwrap(), "Tea");
        assert_eq!(prompter.text("Price").unwrap(), "");
        assert!(prompter.confirm("Sure?", false).unwrap());
        assert!(matches!(
            prompter.text("More"),
            Err(CommandError::ExitRequested)
        ));
    }
}
