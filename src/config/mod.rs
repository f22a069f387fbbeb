use crate::core::auth::{CredentialTable, StaticCredentials};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Seed of the runtime course list; resets on every start.
    #[serde(default = "default_courses")]
    pub courses: Vec<String>,
    /// Roster inserted (idempotently) whenever the database is opened.
    #[serde(default = "default_students")]
    pub students: Vec<String>,
    /// Credential table; the built-in demo accounts are used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<CredentialTable>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_courses() -> Vec<String> {
    [
        "Software Engineering",
        "Maths",
        "Data Structure",
        "Hindhi",
        "Information Security",
        "Frontend Programming",
        "Mobile Application",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_students() -> Vec<String> {
    [
        "Aravind",
        "Aswin",
        "Bhavana",
        "Gokul",
        "Hariharan",
        "Meenatchi",
        "Siva Bharathi",
        "Visal Stephenraj",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            courses: default_courses(),
            students: default_students(),
            users: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("attendtrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".attendtrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("attendtrack.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("attendtrack.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(cfg)
    }

    pub fn credentials(&self) -> StaticCredentials {
        match &self.users {
            Some(table) => StaticCredentials::from_table(table.clone()),
            None => StaticCredentials::builtin(),
        }
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => expand_tilde(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config.database)
    }
}
