use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

const CELL_PREFIX: &str = "cell:";
const KEY_PREFIX: &str = "key:";

/// Discrete formula commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Flip the edit status.
    EditToggle,
    /// Remove the last token of the working formula.
    Clear,
    /// Empty the working formula.
    AllClear,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::EditToggle, Command::Clear, Command::AllClear];

    /// The command identifier used by button layers and scripts.
    pub fn name(self) -> &'static str {
        match self {
            Command::EditToggle => "edit_toggle",
            Command::Clear => "clear",
            Command::AllClear => "allClear",
        }
    }
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| CoreError::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a rendering layer can ask the editor to do.
///
/// Labels are optional because the layer may not have one; the editor treats
/// a missing label as `""`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    Command(Command),
    /// A number, operator or parenthesis button with its label.
    Button(Option<String>),
    /// A grid cell with its label.
    CellClick(Option<String>),
}

impl UserAction {
    pub fn button(label: impl Into<String>) -> Self {
        UserAction::Button(Some(label.into()))
    }

    pub fn cell(label: impl Into<String>) -> Self {
        UserAction::CellClick(Some(label.into()))
    }
}

/// Script syntax: a command identifier, `cell:<label>`, `key:<text>`, or
/// any other text as a button label.
impl FromStr for UserAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(CoreError::EmptyAction);
        }
        if let Ok(command) = s.parse::<Command>() {
            return Ok(UserAction::Command(command));
        }
        if let Some(label) = s.strip_prefix(CELL_PREFIX) {
            return Ok(UserAction::CellClick(non_empty(label)));
        }
        if let Some(text) = s.strip_prefix(KEY_PREFIX) {
            return Ok(UserAction::Button(non_empty(text)));
        }
        Ok(UserAction::button(s))
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAction::Command(command) => write!(f, "{}", command),
            UserAction::Button(label) => {
                write!(f, "{}{}", KEY_PREFIX, label.as_deref().unwrap_or_default())
            }
            UserAction::CellClick(label) => {
                write!(f, "{}{}", CELL_PREFIX, label.as_deref().unwrap_or_default())
            }
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Parse a whitespace-separated action script.
pub fn parse_script(script: &str) -> Result<Vec<UserAction>> {
    script.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_are_exact() {
        assert_eq!("edit_toggle".parse::<Command>().unwrap(), Command::EditToggle);
        assert_eq!("clear".parse::<Command>().unwrap(), Command::Clear);
        assert_eq!("allClear".parse::<Command>().unwrap(), Command::AllClear);
        assert!(matches!(
            "allclear".parse::<Command>(),
            Err(CoreError::UnknownCommand(_))
        ));
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn action_syntax() {
        assert_eq!(
            "clear".parse::<UserAction>().unwrap(),
            UserAction::Command(Command::Clear)
        );
        assert_eq!("cell:B2".parse::<UserAction>().unwrap(), UserAction::cell("B2"));
        assert_eq!("cell:".parse::<UserAction>().unwrap(), UserAction::CellClick(None));
        assert_eq!("7".parse::<UserAction>().unwrap(), UserAction::button("7"));
        assert_eq!(
            "key:clear".parse::<UserAction>().unwrap(),
            UserAction::button("clear")
        );
        assert_eq!("key:".parse::<UserAction>().unwrap(), UserAction::Button(None));
        assert!(matches!("".parse::<UserAction>(), Err(CoreError::EmptyAction)));
    }

    #[test]
    fn display_is_parseable() {
        for action in [
            UserAction::Command(Command::AllClear),
            UserAction::cell("C3"),
            UserAction::button("("),
            UserAction::button("clear"),
        ] {
            assert_eq!(action.to_string().parse::<UserAction>().unwrap(), action);
        }
    }

    #[test]
    fn script_splits_on_whitespace() {
        let actions = parse_script("cell:C3 edit_toggle\n 7  +\tcell:A1").unwrap();
        assert_eq!(
            actions,
            vec![
                UserAction::cell("C3"),
                UserAction::Command(Command::EditToggle),
                UserAction::button("7"),
                UserAction::button("+"),
                UserAction::cell("A1"),
            ]
        );
        assert!(parse_script("").unwrap().is_empty());
    }
}
