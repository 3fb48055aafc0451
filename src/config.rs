//! User configuration (`config.toml`).
//!
//! ```toml
//! [session]
//! document = "budget"
//! user = "ali"
//!
//! [sheet]
//! columns = 8
//! rows = 10
//!
//! [keys]
//! "C-e" = "edit_toggle"
//! "=" = "click_cell"
//! ```
//!
//! Problems are reported as warnings and the defaults are kept.

use cellpad_engine::SessionConfig;
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
pub const MAX_COLUMNS: usize = 26;
pub const MAX_ROWS: usize = 99;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    session: Option<SessionSection>,
    sheet: Option<SheetSection>,
    keys: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionSection {
    document: Option<String>,
    user: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SheetSection {
    columns: Option<usize>,
    rows: Option<usize>,
}

/// Effective configuration after file and command line are merged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub session: SessionConfig,
    /// Key combo -> action name overrides for the keymap
    pub keys: HashMap<String, String>,
}

/// Values given on the command line, which win over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub document: Option<String>,
    pub user: Option<String>,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
}

impl Config {
    /// Apply command-line overrides. Returns warnings for clamped values.
    pub fn apply(&mut self, overrides: Overrides) -> Vec<String> {
        if let Some(document) = overrides.document {
            self.session.document = document;
        }
        if let Some(user) = overrides.user {
            self.session.user = user;
        }
        if let Some(columns) = overrides.columns {
            self.session.columns = columns;
        }
        if let Some(rows) = overrides.rows {
            self.session.rows = rows;
        }
        self.clamp()
    }

    fn clamp(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        let columns = self.session.columns.clamp(1, MAX_COLUMNS);
        if columns != self.session.columns {
            warnings.push(format!(
                "Sheet columns {} out of range, using {}",
                self.session.columns, columns
            ));
            self.session.columns = columns;
        }
        let rows = self.session.rows.clamp(1, MAX_ROWS);
        if rows != self.session.rows {
            warnings.push(format!(
                "Sheet rows {} out of range, using {}",
                self.session.rows, rows
            ));
            self.session.rows = rows;
        }
        warnings
    }
}

/// Load the config from `path`, or from the user config dir when `None`.
///
/// A missing default file is not an error; a missing explicit file is a warning.
pub fn load_config(path: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = Config::default();

    let Some(config_path) = path.map(Path::to_path_buf).or_else(user_config_path) else {
        return (config, warnings);
    };
    if !config_path.exists() {
        if path.is_some() {
            warnings.push(format!("Config file not found: {}", config_path.display()));
        }
        return (config, warnings);
    }

    let file = match read_config_file(&config_path) {
        Ok(file) => file,
        Err(err) => {
            warnings.push(err);
            return (config, warnings);
        }
    };

    if let Some(session) = file.session {
        if let Some(document) = session.document {
            config.session.document = document;
        }
        if let Some(user) = session.user {
            config.session.user = user;
        }
    }
    if let Some(sheet) = file.sheet {
        if let Some(columns) = sheet.columns {
            config.session.columns = columns;
        }
        if let Some(rows) = sheet.rows {
            config.session.rows = rows;
        }
    }
    if let Some(keys) = file.keys {
        config.keys = keys;
    }
    warnings.extend(config.clamp());

    (config, warnings)
}

fn read_config_file(path: &Path) -> Result<ConfigFile, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<ConfigFile>(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellpad")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
