//! Attendance and payroll engine
//!
//! This crate turns raw check-in/check-out records, a holiday calendar, and a
//! working-hours schedule into attendance statistics and an itemized monthly
//! payroll, and resolves GPS coordinates against circular check-in zones.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
