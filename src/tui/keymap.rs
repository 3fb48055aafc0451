//! Keymap translation layer.
//!
//! Keys are translated into [`AppAction`]s, which the app turns into
//! editor actions or local cursor movement. Built-in bindings can be
//! overridden from the `[keys]` table of the config file.

use cellpad_core::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

const MAX_KEY_OVERRIDES: usize = 256;
const KEYPAD_TOKENS: &str = "0123456789.+-*/()";

/// Actions that can be triggered by key presses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// Press a number/operator/parenthesis button with this label.
    Button(String),
    /// Run a formula command.
    Command(Command),
    /// Click the cell under the keyboard cursor.
    ClickCursor,
    /// Move the keyboard cursor by (dx, dy).
    Move(i32, i32),
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    fn plain(code: KeyCode) -> Self {
        KeyCombo {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn matches(&self, key: KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        if self.modifiers.is_empty() {
            return true;
        }
        key.modifiers.contains(self.modifiers)
    }

    pub fn display(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("M");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S");
        }
        let key = match self.code {
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => "Unknown".to_string(),
        };
        if parts.is_empty() {
            key
        } else {
            format!("{}-{}", parts.join("-"), key)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub combo: KeyCombo,
    pub action: AppAction,
}

/// The active set of key bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = Vec::new();
        let mut bind = |code: KeyCode, action: AppAction| {
            bindings.push(Binding {
                combo: KeyCombo::plain(code),
                action,
            })
        };

        for c in KEYPAD_TOKENS.chars() {
            bind(KeyCode::Char(c), AppAction::Button(c.to_string()));
        }

        bind(KeyCode::Left, AppAction::Move(-1, 0));
        bind(KeyCode::Char('h'), AppAction::Move(-1, 0));
        bind(KeyCode::Right, AppAction::Move(1, 0));
        bind(KeyCode::Char('l'), AppAction::Move(1, 0));
        bind(KeyCode::Up, AppAction::Move(0, -1));
        bind(KeyCode::Char('k'), AppAction::Move(0, -1));
        bind(KeyCode::Down, AppAction::Move(0, 1));
        bind(KeyCode::Char('j'), AppAction::Move(0, 1));

        bind(KeyCode::Enter, AppAction::ClickCursor);
        bind(KeyCode::Char(' '), AppAction::ClickCursor);
        bind(KeyCode::Tab, AppAction::Command(Command::EditToggle));
        bind(KeyCode::Char('e'), AppAction::Command(Command::EditToggle));
        bind(KeyCode::Backspace, AppAction::Command(Command::Clear));
        bind(KeyCode::Delete, AppAction::Command(Command::AllClear));
        bind(KeyCode::Char('x'), AppAction::Command(Command::AllClear));
        bind(KeyCode::Char('q'), AppAction::Quit);
        bind(KeyCode::Esc, AppAction::Quit);

        bindings.push(Binding {
            combo: KeyCombo {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            },
            action: AppAction::Quit,
        });

        Keymap { bindings }
    }
}

impl Keymap {
    /// Built-in bindings with user overrides applied on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> (Keymap, Vec<String>) {
        let mut keymap = Keymap::default();
        let mut warnings = Vec::new();

        if overrides.len() > MAX_KEY_OVERRIDES {
            warnings.push(format!(
                "Too many key bindings: {} (max {})",
                overrides.len(),
                MAX_KEY_OVERRIDES
            ));
            return (keymap, warnings);
        }

        let mut entries: Vec<(&String, &String)> = overrides.iter().collect();
        entries.sort();
        for (combo_str, action_str) in entries {
            match (parse_key_combo(combo_str), action_from_str(action_str)) {
                (Ok(combo), Some(action)) => keymap.bind(combo, action),
                (Ok(_), None) => warnings.push(format!(
                    "Invalid action '{}' for key '{}'",
                    action_str, combo_str
                )),
                (Err(err), _) => {
                    warnings.push(format!("Invalid key '{}': {}", combo_str, err))
                }
            }
        }
        (keymap, warnings)
    }

    /// Bind a combo, replacing any existing binding for it.
    pub fn bind(&mut self, combo: KeyCombo, action: AppAction) {
        match self.bindings.iter_mut().find(|b| b.combo == combo) {
            Some(binding) => binding.action = action,
            None => self.bindings.push(Binding { combo, action }),
        }
    }

    /// Translate a key event. Bindings with modifiers take precedence.
    pub fn translate(&self, key: KeyEvent) -> Option<AppAction> {
        self.bindings
            .iter()
            .filter(|binding| !binding.combo.modifiers.is_empty())
            .find(|binding| binding.combo.matches(key))
            .or_else(|| {
                self.bindings
                    .iter()
                    .filter(|binding| binding.combo.modifiers.is_empty())
                    .find(|binding| binding.combo.matches(key))
            })
            .map(|binding| binding.action.clone())
    }

    /// First key bound to an action, for hints.
    pub fn key_for(&self, action: &AppAction) -> Option<String> {
        self.bindings
            .iter()
            .find(|binding| &binding.action == action)
            .map(|binding| binding.combo.display())
    }
}

fn parse_key_combo(input: &str) -> Result<KeyCombo, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty key".to_string());
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCombo::plain(KeyCode::Char(ch)));
    }

    let (mods, key_part) = if !trimmed.contains('-') {
        (KeyModifiers::empty(), trimmed)
    } else if let Some(mod_str) = trimmed.strip_suffix('-') {
        let mod_str = mod_str.trim_end_matches('-');
        if mod_str.is_empty() {
            return Err("missing modifier before '-'".to_string());
        }
        (parse_modifiers(mod_str)?, "-")
    } else {
        let mut split = trimmed.rsplitn(2, '-');
        let key_part = split.next().ok_or_else(|| "empty key".to_string())?;
        let mod_str = split.next().unwrap_or_default();
        (parse_modifiers(mod_str)?, key_part)
    };

    Ok(KeyCombo {
        code: parse_key_code(key_part)?,
        modifiers: mods,
    })
}

fn parse_modifiers(input: &str) -> Result<KeyModifiers, String> {
    let mut modifiers = KeyModifiers::empty();
    for part in input.split('-') {
        let raw = part.trim();
        if raw.is_empty() {
            return Err("empty modifier segment".to_string());
        }
        let flag = match raw.to_ascii_lowercase().as_str() {
            "c" | "ctrl" | "control" => KeyModifiers::CONTROL,
            "m" | "alt" | "meta" => KeyModifiers::ALT,
            "s" | "shift" => KeyModifiers::SHIFT,
            _ => return Err(format!("unknown modifier '{}'", raw)),
        };
        if modifiers.contains(flag) {
            return Err(format!("duplicate modifier '{}'", raw));
        }
        modifiers.insert(flag);
    }
    Ok(modifiers)
}

fn parse_key_code(input: &str) -> Result<KeyCode, String> {
    let trimmed = input.trim();
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCode::Char(ch));
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "enter" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "backspace" => Ok(KeyCode::Backspace),
        "delete" => Ok(KeyCode::Delete),
        "tab" => Ok(KeyCode::Tab),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "space" | "spc" => Ok(KeyCode::Char(' ')),
        "dash" | "minus" => Ok(KeyCode::Char('-')),
        "plus" => Ok(KeyCode::Char('+')),
        _ => Err(format!("unknown key '{}'", input)),
    }
}

fn parse_single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

/// Action names accepted in the `[keys]` table.
fn action_from_str(input: &str) -> Option<AppAction> {
    let trimmed = input.trim();
    if let Ok(command) = trimmed.parse::<Command>() {
        return Some(AppAction::Command(command));
    }
    if let Some(label) = trimmed.strip_prefix("key:") {
        return (!label.is_empty()).then(|| AppAction::Button(label.to_string()));
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "click_cell" => Some(AppAction::ClickCursor),
        "move_left" => Some(AppAction::Move(-1, 0)),
        "move_right" => Some(AppAction::Move(1, 0)),
        "move_up" => Some(AppAction::Move(0, -1)),
        "move_down" => Some(AppAction::Move(0, 1)),
        "quit" => Some(AppAction::Quit),
        _ => None,
    }
}
