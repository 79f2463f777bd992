use crate::error::{config_error, env_error, DtrResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default collection whose child keys are the employee names
pub const DEFAULT_NAMES_PATH: &str = "embeddings";
/// Default root of the per-employee monthly logs
pub const DEFAULT_LOGS_PATH: &str = "logs";
/// Optional letterhead configuration for the printed sheet
pub const PRINT_CONFIG_FILE: &str = "config/print.toml";

/// Default certification line printed under the timesheet
pub const DEFAULT_CERTIFICATION: &str = "I CERTIFY on my honor that the above is a true and correct \
report of the work performed, record of which was made daily at the time of arrival at and \
departure from office.";

/// Letterhead and footer text of the printed timesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Office name shown below the title
    pub office_name: String,
    /// Name printed above the signature line
    pub signatory_name: String,
    /// Title printed below the signatory name
    pub signatory_title: String,
    /// Certification paragraph
    pub certification: String,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            office_name: String::new(),
            signatory_name: String::new(),
            signatory_title: String::new(),
            certification: DEFAULT_CERTIFICATION.to_string(),
        }
    }
}

/// Main configuration structure for the viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the realtime database REST endpoint
    pub database_url: String,
    /// Optional credential appended to every request as `auth=`
    pub database_auth: Option<String>,
    /// Collection listing the tracked employees
    pub names_path: String,
    /// Root of the monthly attendance logs
    pub logs_path: String,
    /// Timezone used to pick the current month
    pub timezone: String,
    /// Address the web server binds to
    pub bind_address: String,
    /// Port the web server listens on
    pub port: u16,
    /// Timeout for store requests in seconds
    pub request_timeout_secs: u64,
    /// Directory served under /assets
    pub assets_dir: String,
    /// Printed sheet letterhead
    pub print: PrintSettings,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> DtrResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let database_url =
            env::var("FIREBASE_DATABASE_URL").map_err(|_| env_error("FIREBASE_DATABASE_URL"))?;

        let database_auth = env::var("FIREBASE_AUTH").ok().filter(|s| !s.is_empty());

        let names_path =
            env::var("DTR_NAMES_PATH").unwrap_or_else(|_| String::from(DEFAULT_NAMES_PATH));
        let logs_path =
            env::var("DTR_LOGS_PATH").unwrap_or_else(|_| String::from(DEFAULT_LOGS_PATH));

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));

        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| String::from("127.0.0.1"));

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| env_error("Invalid PORT format"))?,
            Err(_) => 3000,
        };

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid REQUEST_TIMEOUT_SECS format"))?,
            Err(_) => 10,
        };

        let assets_dir = env::var("ASSETS_DIR").unwrap_or_else(|_| String::from("assets"));

        let config = Config {
            database_url,
            database_auth,
            names_path,
            logs_path,
            timezone,
            bind_address,
            port,
            request_timeout_secs,
            assets_dir,
            print: load_print_settings(Path::new(PRINT_CONFIG_FILE)),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values that can only be verified after loading
    pub fn validate(&self) -> DtrResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(config_error("FIREBASE_DATABASE_URL must not be empty"));
        }
        self.tz()?;
        Ok(())
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> DtrResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}

/// Read the letterhead file, falling back to defaults when missing or malformed
pub fn load_print_settings(path: &Path) -> PrintSettings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<PrintSettings>(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
                PrintSettings::default()
            }
        },
        Err(_) => PrintSettings::default(),
    }
}
