//! Descriptive statistics over a filtered trip view.
//!
//! Four independent groups: travel times, stations, trip durations and
//! rider demographics. Each returns `None` for an empty view.

pub mod duration;
pub mod stations;
pub mod temporal;
pub mod types;
pub mod users;
pub mod utility;

pub use duration::duration_stats;
pub use stations::station_stats;
pub use temporal::time_stats;
pub use users::user_stats;
