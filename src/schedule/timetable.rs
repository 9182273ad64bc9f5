//! Published timetable for the society bus route.

use super::bucketizer::{bucketize, ScheduleBuckets, ScheduleEntry};
use crate::error::ScheduleResult;
use chrono::NaiveDate;
use serde::Serialize;

const ROUTE_48_EFFECTIVE: &str = "1-4-2025";

const CIDCO_TO_GODAVARI: &[&str] = &[
    "6:00", "6:20", "6:40", "7:00", "7:20", "7:40", "8:00", "8:10", "8:20", "8:30", "8:40", "8:50",
    "9:00", "9:10", "9:30", "9:50", "10:00", "10:00", "10:20", "10:30", "10:40", "10:50", "11:20",
    "11:30", "11:40", "11:50", "12:15", "12:35", "12:35", "13:00", "13:20", "13:40", "14:00",
    "16:00", "16:20", "16:40", "16:50", "17:00", "17:10", "17:20", "17:30", "17:40", "17:55",
    "18:05", "18:15", "18:25", "18:35", "18:50", "19:00", "19:10", "19:20", "19:35", "19:45",
    "19:55", "20:05", "20:30", "20:45", "20:55", "21:10", "21:35", "21:45", "21:55", "22:05",
    "22:30", "22:50",
];

const GODAVARI_TO_CIDCO: &[&str] = &[
    "5:40", "6:00", "6:20", "6:40", "7:00", "7:20", "7:40", "8:00", "8:10", "8:20", "8:30", "8:40",
    "8:50", "9:10", "9:30", "9:40", "9:50", "10:00", "10:10", "10:20", "10:30", "11:00", "11:10",
    "11:20", "11:30", "11:45", "11:55", "12:05", "12:15", "12:40", "13:00", "13:20", "13:40",
    "14:00", "14:20", "16:20", "16:40", "17:00", "17:10", "17:20", "17:30", "17:40", "17:50",
    "18:00", "18:15", "18:25", "18:35", "18:45", "18:55", "19:10", "19:20", "19:30", "19:40",
    "20:05", "20:25", "20:30", "20:50", "21:15", "21:20", "21:30", "21:40", "21:55", "22:05",
    "22:15", "22:25", "22:50", "23:10",
];

/// One direction of travel on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Direction {
    pub from: &'static str,
    pub to: &'static str,
    /// Trip count printed on the operator's sheet. Can disagree with `times`.
    pub published_trips: usize,
    pub times: &'static [&'static str],
}

impl Direction {
    pub fn title(&self) -> String {
        format!("{} → {}", self.from, self.to)
    }

    /// Number of listed departures.
    pub fn total_trips(&self) -> usize {
        self.times.len()
    }

    pub fn bucketize(&self) -> ScheduleResult<ScheduleBuckets> {
        bucketize(self.times.iter())
    }

    /// Every departure in 12-hour form, in listed order.
    pub fn quick_reference(&self) -> ScheduleResult<Vec<String>> {
        self.times
            .iter()
            .map(|t| ScheduleEntry::parse(t).map(|e| e.display_time))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timetable {
    pub route_number: &'static str,
    /// Day-month-year as printed, e.g. "1-4-2025"
    pub effective_date: &'static str,
    pub directions: Vec<Direction>,
}

impl Timetable {
    pub fn route_48() -> Self {
        Self {
            route_number: "48",
            effective_date: ROUTE_48_EFFECTIVE,
            directions: vec![
                Direction {
                    from: "Chendani Koliwada CIDCO",
                    to: "Godavari Soci. (Rustomjee Azziano)",
                    published_trips: 64,
                    times: CIDCO_TO_GODAVARI,
                },
                Direction {
                    from: "Godavari Soci. (Rustomjee Azziano C)",
                    to: "Chendani Koliwada CIDCO",
                    published_trips: 68,
                    times: GODAVARI_TO_CIDCO,
                },
            ],
        }
    }

    /// `None` if the printed date is not day-month-year.
    pub fn effective_from(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.effective_date, "%d-%m-%Y").ok()
    }
}
