use std::str::FromStr;

use crate::core::error::AppError;
use crate::features::animals::models::AnimalId;

/// One line typed at the console prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Switch to the user view
    User,
    /// Switch to the admin view, challenging for the code if needed
    Admin,
    /// Show the active view's listing
    List,
    Show(AnimalId),
    Adopt(AnimalId),
    Stats,
    Charts,
    Add,
    Delete(AnimalId),
    Refresh,
    Quit,
}

impl Command {
    /// Commands only the unlocked admin view may run
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::Stats | Command::Charts | Command::Add | Command::Delete(_)
        )
    }
}

fn id_argument(command: &str, argument: Option<&str>) -> Result<AnimalId, AppError> {
    match argument {
        Some(id) if !id.is_empty() => Ok(AnimalId::new(id)),
        _ => Err(AppError::Validation(format!("Usage: {} <id>", command))),
    }
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| AppError::Validation("Empty command".to_string()))?
            .to_lowercase();
        let argument = parts.next();

        if parts.next().is_some() {
            return Err(AppError::Validation(format!(
                "Too many arguments for '{}'",
                name
            )));
        }

        let command = match name.as_str() {
            "help" | "?" => Command::Help,
            "user" => Command::User,
            "admin" => Command::Admin,
            "list" | "ls" => Command::List,
            "show" => Command::Show(id_argument("show", argument)?),
            "adopt" => Command::Adopt(id_argument("adopt", argument)?),
            "stats" => Command::Stats,
            "charts" => Command::Charts,
            "add" => Command::Add,
            "delete" | "rm" => Command::Delete(id_argument("delete", argument)?),
            "refresh" => Command::Refresh,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    other
                )));
            }
        };

        let takes_argument = matches!(
            command,
            Command::Show(_) | Command::Adopt(_) | Command::Delete(_)
        );
        if argument.is_some() && !takes_argument {
            return Err(AppError::Validation(format!(
                "'{}' takes no arguments",
                name
            )));
        }

        Ok(command)
    }
}
