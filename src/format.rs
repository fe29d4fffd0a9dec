use chrono::{DateTime, Utc};

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Human-readable age of `at` relative to `now`. Future timestamps read as
/// "Just now".
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    match days {
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural(days / 7, "week"),
        _ => plural(days / 30, "month"),
    }
}

pub fn letter_grade(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "A"
    } else if percentage >= 80.0 {
        "B"
    } else if percentage >= 70.0 {
        "C"
    } else if percentage >= 60.0 {
        "D"
    } else {
        "F"
    }
}

pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Monthly stipend with thousands separators, e.g. `KES 25,000/month`.
pub fn stipend(amount: Option<u32>, currency: &str) -> String {
    match amount {
        Some(amount) => format!("{} {}/month", currency.trim(), group_thousands(amount)),
        None => "Unpaid".to_string(),
    }
}

fn group_thousands(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn percentage(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.0}%", ratio * 100.0)
    } else {
        "0%".to_string()
    }
}

pub fn due_label(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(due) = due else {
        return "No due date".to_string();
    };

    let days = (due.date_naive() - now.date_naive()).num_days();
    match days {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d if d > 1 => format!("Due in {d} days"),
        -1 => "Overdue by 1 day".to_string(),
        d => format!("Overdue by {} days", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 20, 15, 30, 0).unwrap()
    }

    fn ago(minutes: i64) -> String {
        relative_time(now() - Duration::minutes(minutes), now())
    }

    #[test]
    fn relative_time_minute_and_hour_boundaries() {
        assert_eq!(ago(0), "Just now");
        assert_eq!(relative_time(now() - Duration::seconds(59), now()), "Just now");
        assert_eq!(ago(1), "1 minute ago");
        assert_eq!(ago(59), "59 minutes ago");
        assert_eq!(ago(60), "1 hour ago");
        assert_eq!(ago(119), "1 hour ago");
        assert_eq!(ago(23 * 60 + 59), "23 hours ago");
    }

    #[test]
    fn relative_time_day_week_month_boundaries() {
        assert_eq!(ago(24 * 60), "Yesterday");
        assert_eq!(ago(24 * 60 + 1), "Yesterday");
        assert_eq!(ago(2 * 24 * 60), "2 days ago");
        assert_eq!(ago(6 * 24 * 60), "6 days ago");
        assert_eq!(ago(7 * 24 * 60), "1 week ago");
        assert_eq!(ago(29 * 24 * 60), "4 weeks ago");
        assert_eq!(ago(30 * 24 * 60), "1 month ago");
        assert_eq!(ago(95 * 24 * 60), "3 months ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        assert_eq!(relative_time(now() + Duration::hours(3), now()), "Just now");
    }

    #[test]
    fn letter_grade_thresholds_are_inclusive() {
        assert_eq!(letter_grade(100.0), "A");
        assert_eq!(letter_grade(90.0), "A");
        assert_eq!(letter_grade(89.9), "B");
        assert_eq!(letter_grade(80.0), "B");
        assert_eq!(letter_grade(79.99), "C");
        assert_eq!(letter_grade(60.0), "D");
        assert_eq!(letter_grade(59.9), "F");
        assert_eq!(letter_grade(f64::NAN), "F");
    }

    #[test]
    fn initials_use_first_two_tokens() {
        assert_eq!(initials("amina okafor"), "AO");
        assert_eq!(initials("  Kwame  Nkrumah Mensah "), "KN");
        assert_eq!(initials("Thandiwe"), "T");
        assert_eq!(initials(""), "");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn stipend_groups_thousands() {
        assert_eq!(stipend(Some(25_000), "KES"), "KES 25,000/month");
        assert_eq!(stipend(Some(1_250_000), "NGN"), "NGN 1,250,000/month");
        assert_eq!(stipend(Some(900), "GHS"), "GHS 900/month");
        assert_eq!(stipend(None, "ZAR"), "Unpaid");
    }

    #[test]
    fn percentage_rounds_to_whole_numbers() {
        assert_eq!(percentage(0.75), "75%");
        assert_eq!(percentage(0.846), "85%");
        assert_eq!(percentage(f64::INFINITY), "0%");
    }

    #[test]
    fn due_label_uses_calendar_days() {
        let today = now();
        assert_eq!(due_label(None, today), "No due date");
        assert_eq!(due_label(Some(today + Duration::hours(2)), today), "Due today");
        assert_eq!(due_label(Some(today + Duration::days(1)), today), "Due tomorrow");
        assert_eq!(due_label(Some(today + Duration::days(5)), today), "Due in 5 days");
        assert_eq!(due_label(Some(today - Duration::days(1)), today), "Overdue by 1 day");
        assert_eq!(due_label(Some(today - Duration::days(4)), today), "Overdue by 4 days");
    }
}
