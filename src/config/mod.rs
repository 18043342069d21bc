//! Configuration loading for the attendance and payroll engine.
//!
//! This module loads working-hours schedules, holidays, check-in zones, and
//! payroll policy constants from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Weekly off day: {}", config.weekly_off_day());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    HolidaysFile, IncomeTaxPolicy, PayrollConfig, PayrollPolicy, WorkingHoursFile, ZonesFile,
};
