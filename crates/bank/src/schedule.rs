//! EMI due-date arithmetic.

use chrono::{Datelike, NaiveDate};

/// The next date an EMI falls due, given today and the EMI day of month.
///
/// Due this month while today's day is before the EMI day, otherwise next
/// month. A day past the end of the target month lands on its last day.
pub fn next_emi_date(today: NaiveDate, emi_day: u32) -> NaiveDate {
    let (year, month) = if today.day() < emi_day {
        (today.year(), today.month())
    } else if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };

    let day = emi_day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(today)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}
