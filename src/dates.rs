//! Target-date resolution for quote requests.
//!
//! Two policies exist: the *effective date* (today, rolled forward to Monday
//! on weekends) and the *coming Friday* (next Friday, or today on a Friday).
//! [`target_date`] picks between them by asset class.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

use crate::constants::MARKET_TZ;
use crate::types::AssetClass;

/// Today's date, moved to Monday when `now` falls on a weekend.
///
/// The weekday check uses `now`'s own calendar fields; no timezone
/// conversion is applied.
pub fn effective_date<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    let today = now.date_naive();
    let shift = match today.weekday().num_days_from_sunday() {
        6 => 2,
        0 => 1,
        _ => 0,
    };
    today + Duration::days(shift)
}

/// Date of the next Friday in the market timezone. A Friday maps to itself.
///
/// The offset is taken from `now`'s weekday, added to the instant, and the
/// resulting instant is then read in `America/New_York`.
pub fn coming_friday<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    let weekday = i64::from(now.weekday().num_days_from_sunday());
    let offset = (5 - weekday + 7) % 7;
    let target = now.clone() + Duration::days(offset);
    target.with_timezone(&MARKET_TZ).date_naive()
}

/// Target date for a ticker's chain request.
///
/// ETFs use the effective date unless they are in the weekly-expiry subset;
/// stocks always use the coming Friday.
pub fn target_date<Tz: TimeZone>(
    now: &DateTime<Tz>,
    asset_class: AssetClass,
    weekly_expiry: bool,
) -> NaiveDate {
    match asset_class {
        AssetClass::Etf if !weekly_expiry => effective_date(now),
        AssetClass::Etf | AssetClass::Stock => coming_friday(now),
    }
}

/// Format as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2025-06-09 is a Monday.
    #[test]
    fn effective_date_keeps_weekdays() {
        for day in 9..=13 {
            assert_eq!(effective_date(&utc(2025, 6, day, 15)), ymd(2025, 6, day));
        }
    }

    #[test]
    fn effective_date_rolls_weekends_to_monday() {
        assert_eq!(effective_date(&utc(2025, 6, 14, 15)), ymd(2025, 6, 16));
        assert_eq!(effective_date(&utc(2025, 6, 15, 15)), ymd(2025, 6, 16));
    }

    #[test]
    fn effective_date_uses_local_fields() {
        // Saturday evening at UTC-5 is already Sunday in UTC.
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = est.with_ymd_and_hms(2025, 6, 14, 21, 0, 0).unwrap();
        assert_eq!(effective_date(&now), ymd(2025, 6, 16));
    }

    #[test]
    fn coming_friday_on_friday_is_today() {
        assert_eq!(coming_friday(&utc(2025, 6, 13, 15)), ymd(2025, 6, 13));
    }

    #[test]
    fn coming_friday_on_saturday_is_six_days_later() {
        assert_eq!(coming_friday(&utc(2025, 6, 14, 15)), ymd(2025, 6, 20));
    }

    #[test]
    fn coming_friday_midweek() {
        assert_eq!(coming_friday(&utc(2025, 6, 9, 15)), ymd(2025, 6, 13));
        assert_eq!(coming_friday(&utc(2025, 6, 15, 15)), ymd(2025, 6, 20));
    }

    #[test]
    fn coming_friday_reads_result_in_new_york() {
        // Friday 02:00 UTC is still Thursday evening in New York.
        assert_eq!(coming_friday(&utc(2025, 6, 13, 2)), ymd(2025, 6, 12));
    }

    #[test]
    fn target_date_policy() {
        let saturday = utc(2025, 6, 14, 15);
        assert_eq!(target_date(&saturday, AssetClass::Etf, false), ymd(2025, 6, 16));
        assert_eq!(target_date(&saturday, AssetClass::Etf, true), ymd(2025, 6, 20));
        assert_eq!(target_date(&saturday, AssetClass::Stock, false), ymd(2025, 6, 20));
    }

    #[test]
    fn formats_iso_date() {
        assert_eq!(format_date(ymd(2025, 1, 5)), "2025-01-05");
    }
}
