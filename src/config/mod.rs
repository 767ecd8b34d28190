//! View settings consumed by the period aggregator and alert evaluator, plus
//! their on-disk persistence.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    errors::{ForecastError, Result},
    model::Week,
    projection::{periods::Granularity, week_grid},
};

const SETTINGS_DIR_NAME: &str = "cashflow";
const SETTINGS_FILE_NAME: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";

/// Date bounds the grid was last generated from, kept as entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn weeks(&self) -> Result<Vec<Week>> {
        week_grid::generate_from_range(&self.start, &self.end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, alias = "gran")]
    pub granularity: Granularity,
    #[serde(default, alias = "collapse")]
    pub collapsed: bool,
    #[serde(default, alias = "alert")]
    pub alert_threshold: f64,
    #[serde(
        default,
        alias = "dates",
        deserialize_with = "deserialize_date_range",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_range: Option<DateRange>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            collapsed: false,
            alert_threshold: 0.0,
            date_range: None,
        }
    }
}

impl Settings {
    /// Merges the allowed keys of a JSON object into the settings.
    ///
    /// Unknown keys are skipped. Nothing is applied if any allowed key carries
    /// an invalid value. Returns the canonical names of the keys applied.
    pub fn apply_update(&mut self, update: &Value) -> Result<Vec<String>> {
        let object = update
            .as_object()
            .ok_or_else(|| ForecastError::InvalidSetting("update must be a JSON object".into()))?;

        let mut next = self.clone();
        let mut applied = Vec::new();
        for (key, value) in object {
            match key.as_str() {
                "granularity" | "gran" => {
                    let raw = value.as_str().ok_or_else(|| invalid(key, value))?;
                    next.granularity = raw.parse()?;
                    applied.push("granularity".to_string());
                }
                "collapsed" | "collapse" => {
                    next.collapsed = value.as_bool().ok_or_else(|| invalid(key, value))?;
                    applied.push("collapsed".to_string());
                }
                "alertThreshold" | "alert" => {
                    next.alert_threshold = value.as_f64().ok_or_else(|| invalid(key, value))?;
                    applied.push("alertThreshold".to_string());
                }
                "dateRange" | "dates" => {
                    next.date_range = parse_date_range(value).map_err(|_| invalid(key, value))?;
                    if let Some(range) = &next.date_range {
                        range.weeks()?;
                    }
                    applied.push("dateRange".to_string());
                }
                other => warn!(key = other, "ignoring unknown settings key"),
            }
        }

        *self = next;
        debug!(?applied, "settings updated");
        Ok(applied)
    }

    pub fn set_date_range(&mut self, start: impl Into<String>, end: impl Into<String>) {
        self.date_range = Some(DateRange::new(start, end));
    }
}

fn invalid(key: &str, value: &Value) -> ForecastError {
    ForecastError::InvalidSetting(format!("{key} = {value}"))
}

fn parse_date_range(value: &Value) -> std::result::Result<Option<DateRange>, serde_json::Error> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        other => serde_json::from_value(other.clone()).map(Some),
    }
}

// Stored settings use `{}` for "no range".
fn deserialize_date_range<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateRange>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_date_range(&value).map_err(D::Error::custom)
}

/// Handles persistence for [`Settings`].
#[derive(Debug, Clone)]
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses the platform configuration directory, falling back to the working directory.
    pub fn from_default_location() -> Result<Self> {
        let base = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_DIR_NAME);
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(SETTINGS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
