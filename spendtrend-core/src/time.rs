//! Clock helpers for the trailing analysis window.

use chrono::{Local, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::error::{Result, TrendError};

/// Current wall-clock time, in the given IANA zone or the system local zone.
pub fn local_now(tz: Option<&str>) -> Result<NaiveDateTime> {
    match tz {
        Some(name) => {
            let tz: Tz = name
                .parse()
                .map_err(|_| TrendError::Timezone(name.to_string()))?;
            Ok(Utc::now().with_timezone(&tz).naive_local())
        }
        None => Ok(Local::now().naive_local()),
    }
}

/// Start of the trailing window: `now - days`, clamped to the earliest
/// representable time when the window reaches past it.
pub fn cutoff(now: NaiveDateTime, days: u32) -> NaiveDateTime {
    TimeDelta::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(NaiveDateTime::MIN)
}
