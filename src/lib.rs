//! Attendance record keeping for a small business: clock-in/clock-out
//! records per employee, with overnight-shift handling and overlap
//! detection at save time.
//!
//! The save pipeline lives in [`services::attendance::AttendanceService`];
//! persistence goes through the port traits in [`ports`], with SQLite
//! adapters under [`database`]. The presentation layer is an external
//! caller; [`services::saver::AttendanceSaver`] is the piece of it that
//! owns the confirmation prompts when the service runs in advisory mode.

pub mod config;
pub mod database;
pub mod error;
pub mod ports;
pub mod services;
pub mod utils;

pub use config::Config;
pub use database::models::{AttendanceRecord, Employee, Rank};
pub use error::AttendanceError;
pub use ports::{AttendanceRepository, EmployeeRepository};
pub use services::attendance::AttendanceService;
pub use services::employee::EmployeeService;
pub use services::saver::{AlwaysConfirm, AttendanceSaver, ConfirmPrompt};
