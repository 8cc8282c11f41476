//! REPL command parsing
//!
//! Turns a line of user input into a `Command`. Each command has a one-letter
//! name plus longer aliases; matching is case-insensitive because input is
//! lowercased before parsing.

use thiserror::Error;

use crate::api::ApiError;

/// Errors produced while parsing or running a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// The first word is not a known command name or alias
    #[error("Invalid command \"{0}\"")]
    UnknownCommand(String),

    /// A command that needs an argument was given none
    #[error("No {0} provided")]
    MissingArgument(&'static str),

    /// `next` was used after the last page was shown
    #[error("You are on the last page.")]
    LastPage,

    /// `prev` was used while on the first page
    #[error("You are on the first page.")]
    FirstPage,

    /// `inspect` was used on a pokemon that is not in the pokedex
    #[error("You haven't caught {0} yet")]
    NotCaught(String),

    /// `list` was used with an empty pokedex
    #[error("You haven't caught any pokemon yet")]
    EmptyPokedex,

    /// The catch roll failed
    #[error("{0} escaped!")]
    CatchFailed(String),

    /// Fetching from the API failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Next,
    Prev,
    Explore(String),
    Catch(String),
    Inspect(String),
    List,
}

/// Name, aliases and help text for one command
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Argument placeholder shown in help, if the command takes one
    pub argument: Option<&'static str>,
    pub description: &'static str,
}

/// All commands understood by the REPL
pub static COMMANDS: [CommandSpec; 8] = [
    CommandSpec {
        name: "h",
        aliases: &["help"],
        argument: None,
        description: "Display a help message",
    },
    CommandSpec {
        name: "q",
        aliases: &["quit", "exit"],
        argument: None,
        description: "Quit",
    },
    CommandSpec {
        name: "n",
        aliases: &["next", "map"],
        argument: None,
        description: "Display the next page of location areas",
    },
    CommandSpec {
        name: "p",
        aliases: &["prev", "mapb"],
        argument: None,
        description: "Display the previous page of location areas",
    },
    CommandSpec {
        name: "e",
        aliases: &["explore"],
        argument: Some("<area>"),
        description: "Display the pokemon found in a location area",
    },
    CommandSpec {
        name: "c",
        aliases: &["catch"],
        argument: Some("<pokemon>"),
        description: "Attempt to catch a pokemon and add it to the pokedex",
    },
    CommandSpec {
        name: "i",
        aliases: &["inspect"],
        argument: Some("<pokemon>"),
        description: "View information about a caught pokemon",
    },
    CommandSpec {
        name: "l",
        aliases: &["list", "pokedex"],
        argument: None,
        description: "List all caught pokemon",
    },
];

/// Lowercases `text` and splits it into whitespace-separated words
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl Command {
    /// Parses a command name and its arguments
    ///
    /// Extra arguments beyond the first are ignored.
    ///
    /// # Returns
    /// * `Ok(Command)` if the name matches a command and required arguments are present
    /// * `Err(CommandError::UnknownCommand)` if the name is not recognized
    /// * `Err(CommandError::MissingArgument)` if a required argument is absent
    pub fn parse(name: &str, args: &[String]) -> Result<Self, CommandError> {
        let spec = lookup(name).ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        let first_arg = || args.first().cloned();

        let command = match spec.name {
            "h" => Command::Help,
            "q" => Command::Quit,
            "n" => Command::Next,
            "p" => Command::Prev,
            "e" => Command::Explore(first_arg().ok_or(CommandError::MissingArgument("location area"))?),
            "c" => Command::Catch(first_arg().ok_or(CommandError::MissingArgument("pokemon name"))?),
            "i" => Command::Inspect(first_arg().ok_or(CommandError::MissingArgument("pokemon name"))?),
            "l" => Command::List,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }

    /// Parses a line of raw user input
    ///
    /// # Returns
    /// * `Ok(None)` for a blank line
    /// * `Ok(Some(Command))` for a valid command
    /// * `Err(CommandError)` if parsing fails
    pub fn from_line(line: &str) -> Result<Option<Self>, CommandError> {
        let words = clean_input(line);
        match words.split_first() {
            None => Ok(None),
            Some((name, args)) => Self::parse(name, args).map(Some),
        }
    }
}

/// Finds the command whose name or alias matches `name`
fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name == name || spec.aliases.iter().any(|alias| *alias == name))
}

/// Builds the help message, with commands sorted by name
pub fn help_text() -> String {
    let mut specs: Vec<&CommandSpec> = COMMANDS.iter().collect();
    specs.sort_by_key(|spec| spec.name);

    let mut help = String::from("Available commands:\n");
    for spec in specs {
        let usage = match spec.argument {
            Some(arg) => format!("{} {}", spec.name, arg),
            None => spec.name.to_string(),
        };
        help.push_str(&format!(
            "    {:<13} {} (also: {})\n",
            usage,
            spec.description,
            spec.aliases.join(", ")
        ));
    }
    help
}
