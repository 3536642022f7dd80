use crate::{
    error::ConfigError,
    schema_file::{load_schema, resolve_timezone, validate_schema},
};
use chrono_tz::Tz;
use connectors::{
    acquire::settings::{AcquireSettings, SessionSettings},
    sink::sheets::{DEFAULT_API_BASE, SheetsSettings},
};
use model::transform::schema::SchemaConfig;
use std::{collections::HashMap, fmt, path::PathBuf, str::FromStr, time::Duration};
use tracing::debug;

pub const SHEET_ID: &str = "SHEET_ID";
pub const SHEET_NAME: &str = "SHEET_NAME";
pub const SHEETS_ACCESS_TOKEN: &str = "SHEETS_ACCESS_TOKEN";
pub const SHEETS_API_BASE: &str = "SHEETS_API_BASE";
pub const WMS_USERNAME: &str = "WMS_USERNAME";
pub const WMS_PASSWORD: &str = "WMS_PASSWORD";
pub const WMS_EXPORT_COMMAND: &str = "WMS_EXPORT_COMMAND";
pub const WMS_DOWNLOAD_DIR: &str = "WMS_DOWNLOAD_DIR";
pub const WMS_EXPORT_PREFIX: &str = "WMS_EXPORT_PREFIX";
pub const WMS_FILE_TIMEOUT_SECS: &str = "WMS_FILE_TIMEOUT_SECS";
pub const WMS_FILE_POLL_MILLIS: &str = "WMS_FILE_POLL_MILLIS";
pub const WMS_SETUP_ATTEMPTS: &str = "WMS_SETUP_ATTEMPTS";
pub const WMS_SETUP_RETRY_SECS: &str = "WMS_SETUP_RETRY_SECS";
pub const WMS_EXPORT_TIMEOUT_SECS: &str = "WMS_EXPORT_TIMEOUT_SECS";
pub const WMS_SCHEMA_FILE: &str = "WMS_SCHEMA_FILE";

pub const DEFAULT_SHEET_NAME: &str = "WMS data";

/// How to start the portal export.
#[derive(Clone)]
pub struct ExportCommand {
    pub command: String,
    /// Portal credentials handed to the command's environment.
    pub envs: Vec<(String, String)>,
}

impl fmt::Debug for ExportCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.envs.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("ExportCommand")
            .field("command", &self.command)
            .field("envs", &keys)
            .finish()
    }
}

/// Everything one sync run needs, read once from the environment.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub acquire: AcquireSettings,
    pub session: SessionSettings,
    pub export: Option<ExportCommand>,
    pub sheets: Option<SheetsSettings>,
    pub schema: SchemaConfig,
    pub timezone: Tz,
}

impl SyncConfig {
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let vars = Vars(vars);

        let defaults = AcquireSettings::default();
        let acquire = AcquireSettings {
            download_dir: vars
                .get(WMS_DOWNLOAD_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.download_dir),
            file_prefix: vars
                .get(WMS_EXPORT_PREFIX)
                .map(str::to_string)
                .unwrap_or(defaults.file_prefix),
            file_extension: defaults.file_extension,
            file_timeout: vars
                .parse(WMS_FILE_TIMEOUT_SECS)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.file_timeout),
            poll_interval: vars
                .parse(WMS_FILE_POLL_MILLIS)?
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
        };
        if acquire.poll_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: WMS_FILE_POLL_MILLIS,
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let defaults = SessionSettings::default();
        let session = SessionSettings {
            attempts: vars.parse(WMS_SETUP_ATTEMPTS)?.unwrap_or(defaults.attempts),
            retry_delay: vars
                .parse(WMS_SETUP_RETRY_SECS)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry_delay),
            timeout: vars
                .parse(WMS_EXPORT_TIMEOUT_SECS)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        };
        if session.attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: WMS_SETUP_ATTEMPTS,
                value: "0".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }

        let export = vars.get(WMS_EXPORT_COMMAND).map(|command| ExportCommand {
            command: command.to_string(),
            envs: [WMS_USERNAME, WMS_PASSWORD]
                .into_iter()
                .filter_map(|key| vars.get(key).map(|v| (key.to_string(), v.to_string())))
                .collect(),
        });

        let sheets = match (vars.get(SHEET_ID), vars.get(SHEETS_ACCESS_TOKEN)) {
            (Some(id), Some(token)) => {
                let name = vars.get(SHEET_NAME).unwrap_or(DEFAULT_SHEET_NAME);
                let settings = SheetsSettings {
                    api_base: vars
                        .get(SHEETS_API_BASE)
                        .unwrap_or(DEFAULT_API_BASE)
                        .to_string(),
                    ..SheetsSettings::new(id, name, token)
                };
                Some(settings)
            }
            (Some(_), None) => return Err(ConfigError::MissingVar(SHEETS_ACCESS_TOKEN)),
            (None, Some(_)) => return Err(ConfigError::MissingVar(SHEET_ID)),
            (None, None) => None,
        };

        let schema = match vars.get(WMS_SCHEMA_FILE) {
            Some(path) => load_schema(PathBuf::from(path).as_path())?,
            None => {
                let schema = SchemaConfig::default();
                validate_schema(&schema)?;
                schema
            }
        };
        let timezone = resolve_timezone(&schema.timezone)?;

        let config = SyncConfig {
            acquire,
            session,
            export,
            sheets,
            schema,
            timezone,
        };
        debug!("Resolved sync config: {:?}", config);
        Ok(config)
    }

    /// Publisher settings, required by a real (non dry-run) sync.
    pub fn require_sheets(&self) -> Result<&SheetsSettings, ConfigError> {
        self.sheets
            .as_ref()
            .ok_or(ConfigError::MissingVar(SHEET_ID))
    }
}

/// Lookup helper that treats blank values as unset.
struct Vars<'a>(&'a HashMap<String, String>);

impl Vars<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                    key,
                    value: raw.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}
