//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading schedules,
//! holidays, zones, and payroll policy from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use chrono::Weekday;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{CheckinZone, Holiday, HolidayCalendar, WorkingHoursConfig};

use super::types::{HolidaysFile, PayrollConfig, PayrollPolicy, WorkingHoursFile, ZonesFile};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query schedules, holidays, zones, and policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── working_hours.yaml  # Global default schedule and per-user overrides
/// ├── holidays.yaml       # Holiday list
/// ├── zones.yaml          # Check-in zones
/// └── payroll.yaml        # Overtime multiplier, weekly off day, policy
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let schedule = loader.working_hours_for(Some("u_001")).unwrap();
/// println!("Shift starts at {}", schedule.start_time);
///
/// let holidays = loader.holiday_calendar();
/// println!("{} active holidays", holidays.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schedules: Vec<WorkingHoursConfig>,
    holidays: Vec<Holiday>,
    zones: Vec<CheckinZone>,
    payroll: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let working_hours = Self::load_yaml::<WorkingHoursFile>(&path.join("working_hours.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysFile>(&path.join("holidays.yaml"))?;
        let zones = Self::load_yaml::<ZonesFile>(&path.join("zones.yaml"))?;
        let payroll = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;

        info!(
            path = %path.display(),
            schedules = working_hours.schedules.len(),
            holidays = holidays.holidays.len(),
            zones = zones.zones.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            schedules: working_hours.schedules,
            holidays: holidays.holidays,
            zones: zones.zones,
            payroll,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the schedule that applies to a user.
    ///
    /// An active per-user override takes precedence over the active global
    /// default (the schedule without a `user_id`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if neither an override nor a default is active.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let default_schedule = loader.working_hours_for(None)?;
    /// println!("Break: {} minutes", default_schedule.break_duration_minutes);
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn working_hours_for(&self, user_id: Option<&str>) -> EngineResult<&WorkingHoursConfig> {
        let active = || self.schedules.iter().filter(|s| s.is_active);

        user_id
            .and_then(|id| active().find(|s| s.user_id.as_deref() == Some(id)))
            .or_else(|| active().find(|s| s.user_id.is_none()))
            .ok_or_else(|| EngineError::ConfigNotFound {
                path: "working_hours.yaml (no active default schedule)".to_string(),
            })
    }

    /// Returns the calendar of active holidays.
    pub fn holiday_calendar(&self) -> HolidayCalendar {
        HolidayCalendar::from_holidays(&self.holidays)
    }

    /// Returns the active check-in zones in file order.
    pub fn active_zones(&self) -> Vec<CheckinZone> {
        self.zones.iter().filter(|z| z.is_active).cloned().collect()
    }

    /// Returns the payroll policy constants.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.payroll.policy
    }

    /// Returns the overtime multiplier used when a caller supplies none.
    pub fn default_overtime_multiplier(&self) -> Decimal {
        self.payroll.default_overtime_multiplier
    }

    /// Returns the weekday excluded from attendance aggregation.
    pub fn weekly_off_day(&self) -> Weekday {
        self.payroll.weekly_off_day
    }
}
