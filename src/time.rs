use chrono::{Local, NaiveDateTime, Utc};

/// the single place "now" comes from. every time sensitive decision takes
/// its clock through this trait so tests can pin the moment
pub trait Clock {
    fn now_millis(&self) -> i64;

    fn now_local(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn now_local(&self) -> NaiveDateTime {
        // meeting records carry naive local date and time, so gate
        // comparisons happen in device local time as well
        Local::now().naive_local()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub millis: i64,
    pub local: NaiveDateTime,
}

#[cfg(test)]
impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        FixedClock {
            millis,
            local: chrono::DateTime::from_timestamp_millis(millis)
                .unwrap()
                .naive_utc(),
        }
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }

    fn now_local(&self) -> NaiveDateTime {
        self.local
    }
}
