//! Prayer-time boards for the 81 provinces of Turkey.
//!
//! For every province the six daily times are taken from a
//! [`ScheduleSource`](source::ScheduleSource), the active period is worked out
//! by [`resolve`], and the result is rendered into a fixed-width text board.

pub mod cities;
pub mod clock;
pub mod config;
pub mod error;
pub mod generate;
pub mod period;
pub mod render;
pub mod resolver;
pub mod schedule;
pub mod source;

pub use cities::City;
pub use config::Config;
pub use error::{Error, Result};
pub use generate::{Generator, RunReport};
pub use period::Period;
pub use resolver::{resolve, Resolution};
pub use schedule::PrayerSchedule;

/// The single zone every schedule and board is expressed in.
pub const TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::Istanbul;
