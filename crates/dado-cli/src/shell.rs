//! Interactive session.
//!
//! The history is loaded once when the session opens and every roll is
//! written through immediately, so quitting at any point loses nothing.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use dado_application::DiceService;
use dado_core::history::HistoryRepository;

use crate::commands::{self, Action, parse_count};

const COMMANDS: [&str; 7] = ["roll", "sum", "history", "clear", "dice", "help", "quit"];

const HELP: &str = "\
  roll <die> [modifier]   roll one die; +N keeps the best of N, -N the worst
  sum <die>=<count>...    roll a mix of dice and add them up
  history [n]             show the last n rolls, newest first
  clear                   erase the roll history
  dice                    list the configured dice
  help                    show this help
  quit                    leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Run(Action),
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = words.collect();

        match command.to_ascii_lowercase().as_str() {
            "roll" | "r" => match args.as_slice() {
                [die] => Ok(Self::Run(Action::Roll {
                    die: die.to_string(),
                    modifier: String::new(),
                })),
                [die, modifier] => Ok(Self::Run(Action::Roll {
                    die: die.to_string(),
                    modifier: modifier.to_string(),
                })),
                _ => Err("usage: roll <die> [modifier]".to_string()),
            },
            "sum" | "s" => {
                if args.is_empty() {
                    return Err("usage: sum <die>=<count>...".to_string());
                }
                let counts = args
                    .iter()
                    .map(|arg| parse_count(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Run(Action::Sum { counts }))
            }
            "history" | "h" => match args.as_slice() {
                [] => Ok(Self::Run(Action::History { limit: None })),
                [n] => n
                    .parse()
                    .map(|limit| Self::Run(Action::History { limit: Some(limit) }))
                    .map_err(|_| format!("invalid count '{}'", n)),
                _ => Err("usage: history [n]".to_string()),
            },
            "clear" => Ok(Self::Run(Action::Clear)),
            "dice" => Ok(Self::Run(Action::Dice)),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command '{}' (try 'help')", other)),
        }
    }
}

/// Completion for command names and, after `roll`, die labels.
struct ShellHelper {
    dice: Vec<String>,
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let start = line.rfind(' ').map_or(0, |i| i + 1);
        let word = &line[start..];

        let options: Vec<String> = if start == 0 {
            COMMANDS.iter().map(|c| c.to_string()).collect()
        } else if completes_die_label(line) {
            self.dice.clone()
        } else {
            Vec::new()
        };

        let candidates = options
            .into_iter()
            .filter(|option| option.starts_with(&word.to_ascii_lowercase()))
            .map(|option| Pair {
                display: option.clone(),
                replacement: option,
            })
            .collect();
        Ok((start, candidates))
    }
}

/// True while the cursor sits on the first argument of `roll` (or `r`).
fn completes_die_label(line: &str) -> bool {
    let mut words = line.split_whitespace();
    let is_roll = words
        .next()
        .is_some_and(|command| matches!(command.to_ascii_lowercase().as_str(), "roll" | "r"));
    let args = words.count();
    let after_space = line.ends_with(char::is_whitespace);

    is_roll && ((args == 0 && after_space) || (args == 1 && !after_space))
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let command = line.split_whitespace().next().unwrap_or("");
        if COMMANDS.contains(&command) {
            Owned(line.replacen(command, &command.bright_cyan().to_string(), 1))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

pub fn run<R: HistoryRepository>(service: &mut DiceService<R>) -> Result<()> {
    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ShellHelper {
        dice: service
            .dice()
            .iter()
            .map(|d| d.label().to_ascii_lowercase())
            .collect(),
    }));

    println!(
        "{} {} rolls in history. Type 'help' for commands.",
        "dado".bold(),
        service.history().len()
    );

    let mut stdout = std::io::stdout();
    loop {
        let line = match editor.readline("dado> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        match ShellCommand::parse(line) {
            Ok(ShellCommand::Run(action)) => {
                if let Err(e) = commands::execute(service, &action, &mut stdout) {
                    eprintln!("{} {}", "error:".red().bold(), e);
                }
            }
            Ok(ShellCommand::Help) => println!("{}", HELP),
            Ok(ShellCommand::Quit) => break,
            Err(message) => eprintln!("{} {}", "error:".red().bold(), message),
        }
    }

    tracing::debug!("[Shell] Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        ShellCommand::parse(line).unwrap()
    }

    #[test]
    fn test_parse_roll() {
        assert_eq!(
            parse("roll d20 +2"),
            ShellCommand::Run(Action::Roll {
                die: "d20".to_string(),
                modifier: "+2".to_string()
            })
        );
        assert_eq!(
            parse("R D6"),
            ShellCommand::Run(Action::Roll {
                die: "D6".to_string(),
                modifier: String::new()
            })
        );
        assert!(ShellCommand::parse("roll").is_err());
        assert!(ShellCommand::parse("roll d6 1 2").is_err());
    }

    #[test]
    fn test_parse_sum() {
        assert_eq!(
            parse("sum d6=2 d4=1"),
            ShellCommand::Run(Action::Sum {
                counts: vec![("d6".to_string(), 2), ("d4".to_string(), 1)]
            })
        );
        assert!(ShellCommand::parse("sum").is_err());
        assert!(ShellCommand::parse("sum d6").is_err());
    }

    #[test]
    fn test_die_label_completion_after_roll_aliases() {
        assert!(completes_die_label("roll "));
        assert!(completes_die_label("roll d2"));
        assert!(completes_die_label("r "));
        assert!(completes_die_label("ROLL D"));
        assert!(completes_die_label("R d1"));
        assert!(!completes_die_label("roll"));
        assert!(!completes_die_label("roll d20 "));
        assert!(!completes_die_label("roll d20 +"));
        assert!(!completes_die_label("rolling d"));
        assert!(!completes_die_label("sum d"));
    }

    #[test]
    fn test_parse_history_and_misc() {
        assert_eq!(parse("history"), ShellCommand::Run(Action::History { limit: None }));
        assert_eq!(
            parse("h 5"),
            ShellCommand::Run(Action::History { limit: Some(5) })
        );
        assert!(ShellCommand::parse("history many").is_err());
        assert_eq!(parse("clear"), ShellCommand::Run(Action::Clear));
        assert_eq!(parse("dice"), ShellCommand::Run(Action::Dice));
        assert_eq!(parse("?"), ShellCommand::Help);
        assert_eq!(parse("EXIT"), ShellCommand::Quit);
        assert!(ShellCommand::parse("flip coin").is_err());
    }
}
