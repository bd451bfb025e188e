use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::WorklogError;

/// Environment variable naming the SQLite database file.
pub const DATABASE_ENV: &str = "FLATRATE_DB";
/// Environment variable holding the shared API secret.
///
/// When unset the server runs with access control disabled. That default
/// exists so a local instance cannot lock you out and is only acceptable
/// for development on localhost; any externally reachable deployment must
/// set a key.
pub const API_KEY_ENV: &str = "API_KEY";
/// Environment variable overriding the listen address.
pub const LISTEN_ENV: &str = "FLATRATE_LISTEN";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4000";

/// Application configuration struct.
/// Holds the data we need to open the local database and serve the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfiguration {
    /// Path to the SQLite file holding the work log records.
    pub database_path: PathBuf,
    /// Shared secret expected in the `x-api-key` header, if configured.
    pub api_key: Option<String>,
    /// Socket address the HTTP server binds to.
    pub listen_addr: SocketAddr,
}

impl AppConfiguration {
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Filename of the Sqlite DBMS holding the work log records, used when
/// `FLATRATE_DB` is not set.
#[must_use]
pub fn database_file() -> PathBuf {
    project_dirs().data_dir().join("flatrate.db")
}

/// Loads the configuration from the environment, falling back to the
/// defaults above for anything unset.
///
/// # Errors
/// Returns `WorklogError::BadListenAddr` if `FLATRATE_LISTEN` is set but
/// does not parse as a socket address.
pub fn load() -> Result<AppConfiguration, WorklogError> {
    let database_path = match env::var(DATABASE_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => database_file(),
    };

    let api_key = env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());

    let listen_addr = env::var(LISTEN_ENV)
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse::<SocketAddr>()
        .map_err(|e| WorklogError::BadListenAddr(format!("{e}")))?;

    Ok(AppConfiguration {
        database_path,
        api_key,
        listen_addr,
    })
}

fn project_dirs() -> ProjectDirs {
    ProjectDirs::from("com", "flatrate", "flatrate")
        .expect("Unable to determine the name of the 'project_dirs' directory name")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database_file_ends_with_flatrate_db() {
        let path = database_file();
        assert!(path.to_string_lossy().ends_with("flatrate.db"));
    }

    #[test]
    fn default_listen_addr_parses() {
        let addr = DEFAULT_LISTEN_ADDR.parse::<SocketAddr>().unwrap();
        assert_eq!(addr.port(), 4000);
    }

    #[test]
    fn has_api_key_reflects_configuration() {
        let open = AppConfiguration {
            database_path: PathBuf::from("x.db"),
            api_key: None,
            listen_addr: DEFAULT_LISTEN_ADDR.parse().unwrap(),
        };
        assert!(!open.has_api_key());

        let guarded = AppConfiguration {
            api_key: Some("secret".to_string()),
            ..open
        };
        assert!(guarded.has_api_key());
    }
}
