use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Midnight UTC at the start of `date`.
///
/// Calendar dates entered in forms are stored as this instant, so a budget
/// window ending on a date includes transactions recorded for that date.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Last representable instant of `date` in UTC.
pub fn end_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    start_of_day_utc(date) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Sunday 00:00 UTC of the week containing `now`.
pub fn start_of_week_utc(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let offset = i64::from(today.weekday().num_days_from_sunday());
    start_of_day_utc(today - Duration::days(offset))
}

/// First day of the month containing `now`, at 00:00 UTC.
pub fn start_of_month_utc(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    start_of_day_utc(first)
}

/// `YYYY-MM` key used to bucket instants by calendar month.
pub fn month_key(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_and_end_of_day() {
        let start = start_of_day_utc(date(2024, 1, 31));
        let end = end_of_day_utc(date(2024, 1, 31));
        assert_eq!(start.to_rfc3339(), "2024-01-31T00:00:00+00:00");
        assert_eq!(end + Duration::nanoseconds(1), start_of_day_utc(date(2024, 2, 1)));
    }

    #[test]
    fn test_start_of_week_is_sunday() {
        // 2024-01-10 is a Wednesday
        let now = start_of_day_utc(date(2024, 1, 10)) + Duration::hours(15);
        assert_eq!(start_of_week_utc(now), start_of_day_utc(date(2024, 1, 7)));

        // A Sunday maps to itself
        let sunday = start_of_day_utc(date(2024, 1, 7)) + Duration::hours(1);
        assert_eq!(start_of_week_utc(sunday), start_of_day_utc(date(2024, 1, 7)));
    }

    #[test]
    fn test_start_of_month_and_key() {
        let now = start_of_day_utc(date(2024, 2, 29)) + Duration::hours(23);
        assert_eq!(start_of_month_utc(now), start_of_day_utc(date(2024, 2, 1)));
        assert_eq!(month_key(now), "2024-02");
    }
}
