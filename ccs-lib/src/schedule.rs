use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Deserialize};

/// minutes past the scheduled instant during which a conversation may still
/// be opened
pub const ACCESS_WINDOW_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct FromStrError;

impl FromStr for MeetingStatus {
    type Err = FromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(MeetingStatus::Scheduled),
            "completed" => Ok(MeetingStatus::Completed),
            "cancelled" => Ok(MeetingStatus::Cancelled),
            _ => Err(FromStrError),
        }
    }
}

/// joins the stored calendar date and wall clock time into the meeting
/// instant. both are naive local values, the store carries no timezone
pub fn scheduled_instant(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

pub fn access_window_end(instant: NaiveDateTime) -> NaiveDateTime {
    instant + Duration::minutes(ACCESS_WINDOW_MINUTES)
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn window_end_is_thirty_minutes_out() {
        let instant = scheduled_instant(date(2024, 11, 4), time(14, 0));
        let end = access_window_end(instant);

        assert_eq!(end, scheduled_instant(date(2024, 11, 4), time(14, 30)));
    }

    #[test]
    fn window_end_crosses_midnight() {
        let instant = scheduled_instant(date(2024, 11, 4), time(23, 45));
        let end = access_window_end(instant);

        assert_eq!(end, scheduled_instant(date(2024, 11, 5), time(0, 15)));
    }

    #[test]
    fn status_str_round_trip() {
        for status in [MeetingStatus::Scheduled, MeetingStatus::Completed, MeetingStatus::Cancelled] {
            let Ok(parsed) = MeetingStatus::from_str(status.as_str()) else {
                panic!("failed to parse status string {:?}", status.as_str());
            };

            assert_eq!(parsed, status);
        }

        assert!(MeetingStatus::from_str("pending").is_err());
    }
}
