//! Bus timetable: departure data and grouping by part of the day.

pub mod bucketizer;
pub mod timetable;

pub use bucketizer::{bucketize, Meridiem, Period, ScheduleBuckets, ScheduleEntry};
pub use timetable::{Direction, Timetable};
