#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
    use cyclet::libs::calendar::BusinessCalendar;
    use cyclet::libs::duration::{business_minutes, raw_minutes, weekdays_strictly_between};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_same_day_duration() {
        let calendar = BusinessCalendar::default();
        // Tuesday 09:00 to 14:30.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 2, 9, 0), at(2024, 1, 2, 14, 30)), 330);
    }

    #[test]
    fn test_weekend_spanning_duration() {
        let calendar = BusinessCalendar::default();
        // Friday 17:00 to Monday 09:00: 60 minutes Friday + 60 minutes Monday.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 5, 17, 0), at(2024, 1, 8, 9, 0)), 120);
    }

    #[test]
    fn test_full_week_duration() {
        let calendar = BusinessCalendar::default();
        // Monday 08:00 to the following Monday 18:00: five full days plus
        // both boundary days, 600 minutes each.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 1, 8, 0), at(2024, 1, 8, 18, 0)), 3000);
    }

    #[test]
    fn test_adjacent_days_no_full_days_between() {
        let calendar = BusinessCalendar::default();
        // Tuesday 17:00 to Wednesday 09:00.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 2, 17, 0), at(2024, 1, 3, 9, 0)), 120);
    }

    #[test]
    fn test_exact_boundary_endpoints() {
        let calendar = BusinessCalendar::default();
        // Start exactly at opening, end exactly at closing.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 2, 8, 0), at(2024, 1, 2, 18, 0)), 600);
        // Clipping off-hours endpoints lands on the same boundaries.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 2, 5, 0), at(2024, 1, 2, 23, 0)), 600);
    }

    #[test]
    fn test_inverted_interval_is_zero() {
        let calendar = BusinessCalendar::default();
        assert_eq!(business_minutes(&calendar, at(2024, 1, 3, 12, 0), at(2024, 1, 2, 12, 0)), 0);
    }

    #[test]
    fn test_interval_inside_weekend_gap_is_zero() {
        let calendar = BusinessCalendar::default();
        // Received and opened on the same Saturday: the forward clip lands
        // on Monday, the backward clip on Friday, so nothing counts.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 6, 10, 0), at(2024, 1, 6, 15, 0)), 0);
    }

    #[test]
    fn test_interval_inside_overnight_gap_is_zero() {
        let calendar = BusinessCalendar::default();
        // Tuesday 19:00 to Wednesday 07:00 never touches the window.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 2, 19, 0), at(2024, 1, 3, 7, 0)), 0);
    }

    #[test]
    fn test_raw_minutes_floor_at_zero() {
        assert_eq!(raw_minutes(at(2024, 1, 2, 9, 0), at(2024, 1, 2, 10, 30)), 90);
        assert_eq!(raw_minutes(at(2024, 1, 2, 10, 30), at(2024, 1, 2, 9, 0)), 0);
    }

    fn weekdays_bruteforce(start: NaiveDate, end: NaiveDate) -> i64 {
        let mut count = 0;
        let mut day = start + Duration::days(1);
        while day < end {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                count += 1;
            }
            day += Duration::days(1);
        }
        count
    }

    #[test]
    fn test_closed_form_matches_bruteforce() {
        // Start on every weekday of the first week of 2024 and extend the
        // gap up to a full month; the closed form must match a day scan.
        for start_day in 1..=5 {
            let start = NaiveDate::from_ymd_opt(2024, 1, start_day).unwrap();
            for offset in 1..=31 {
                let end = start + Duration::days(offset);
                assert_eq!(
                    weekdays_strictly_between(start, end),
                    weekdays_bruteforce(start, end),
                    "start {} end {}",
                    start,
                    end
                );
            }
        }
    }

    #[test]
    fn test_remainder_straddling_weekend() {
        // Thursday start with a remainder window that crosses Sat/Sun.
        let start = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(weekdays_strictly_between(start, end), 3); // Fri, Mon, Tue
    }

    #[test]
    fn test_zero_gap_between_adjacent_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(weekdays_strictly_between(start, start + Duration::days(1)), 0);
        assert_eq!(weekdays_strictly_between(start, start), 0);
    }

    #[test]
    fn test_duration_with_custom_window() {
        let calendar = BusinessCalendar::new(
            chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        );
        // Monday 09:00 to Tuesday 17:00 with an 8-hour window.
        assert_eq!(business_minutes(&calendar, at(2024, 1, 1, 9, 0), at(2024, 1, 2, 17, 0)), 960);
    }
}
