use serde::Serialize;
use time::macros::format_description;
use time::Date;

use crate::records::repo::WeightRecord;
use crate::settings::repo::UserSettings;

#[derive(Debug, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_days: i64,
    pub total_lost: f64,
    pub current_weight: f64,
    pub remaining: f64,
    pub weekly_average: f64,
    pub best_week: f64,
    pub streak: i64,
}

/// Calendar date of a stored record. Dates may carry a time-of-day component;
/// only the leading `YYYY-MM-DD` part participates in day arithmetic.
fn parse_day(raw: &str) -> Option<Date> {
    let day = raw.split(|c| c == 'T' || c == ' ').next().unwrap_or(raw);
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derive the summary from the user's settings and their records ordered by
/// date ascending. Pure; all rounding happens on the way out.
pub fn compute(settings: &UserSettings, records: &[WeightRecord]) -> StatsSummary {
    if records.is_empty() {
        return StatsSummary {
            total_days: 0,
            total_lost: 0.0,
            current_weight: 0.0,
            remaining: settings.target_weight,
            weekly_average: 0.0,
            best_week: 0.0,
            streak: 0,
        };
    }

    let current_weight = records[records.len() - 1].weight;
    let total_lost = settings.initial_weight - current_weight;
    let remaining = (current_weight - settings.target_weight).max(0.0);

    // Consecutive-day run ending at the most recent record. A gap other than
    // exactly one calendar day (or an unparseable date) ends the walk.
    let mut streak = 1i64;
    for i in (1..records.len()).rev() {
        match (parse_day(&records[i].date), parse_day(&records[i - 1].date)) {
            (Some(current), Some(previous)) if (current - previous).whole_days() == 1 => {
                streak += 1;
            }
            _ => break,
        }
    }

    let mut weekly_average = 0.0;
    let mut best_week = 0.0;
    if records.len() >= 7 {
        // Partial trailing week drops out of the denominator, not the total.
        let weeks = (records.len() / 7) as f64;
        weekly_average = total_lost / weeks;

        let mut i = 0;
        while i + 6 < records.len() {
            let week_start = records[i].weight;
            let week_end = records[(i + 6).min(records.len() - 1)].weight;
            let lost = week_start - week_end;
            if lost > best_week {
                best_week = lost;
            }
            i += 7;
        }
    }

    StatsSummary {
        total_days: records.len() as i64,
        total_lost: round1(total_lost),
        current_weight: round1(current_weight),
        remaining: round1(remaining),
        weekly_average: round1(weekly_average),
        best_week: round1(best_week),
        streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(initial_weight: f64, target_weight: f64) -> UserSettings {
        UserSettings {
            id: "s1".into(),
            user_id: "u1".into(),
            height: 170.0,
            gender: "male".into(),
            initial_weight,
            target_weight,
            target_months: 6,
            reminder_enabled: 0,
            reminder_time: "20:00".into(),
            updated_at: String::new(),
        }
    }

    fn record(date: &str, weight: f64) -> WeightRecord {
        WeightRecord {
            id: format!("r-{date}"),
            user_id: "u1".into(),
            date: date.into(),
            weight,
            feeling: None,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn empty_records_give_zeroed_summary() {
        let summary = compute(&settings(200.0, 150.0), &[]);
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.total_lost, 0.0);
        assert_eq!(summary.current_weight, 0.0);
        assert_eq!(summary.remaining, 150.0);
        assert_eq!(summary.streak, 0);
    }

    #[test]
    fn eight_consecutive_days_match_expected_figures() {
        let weights = [200.0, 198.0, 196.0, 195.0, 194.0, 193.0, 192.0, 190.0];
        let records: Vec<_> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| record(&format!("2024-01-{:02}", i + 1), *w))
            .collect();

        let summary = compute(&settings(200.0, 150.0), &records);
        assert_eq!(summary.total_days, 8);
        assert_eq!(summary.total_lost, 10.0);
        assert_eq!(summary.current_weight, 190.0);
        assert_eq!(summary.remaining, 40.0);
        // floor(8 / 7) = 1 week in the denominator.
        assert_eq!(summary.weekly_average, 10.0);
        // Single full window: 200.0 - 192.0.
        assert_eq!(summary.best_week, 8.0);
        assert_eq!(summary.streak, 8);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let records = vec![
            record("2024-01-01", 200.0),
            record("2024-01-02", 199.0),
            record("2024-01-03", 198.5),
            record("2024-01-04", 198.0),
            record("2024-01-05", 197.0),
            record("2024-01-07", 196.0),
        ];
        let summary = compute(&settings(200.0, 150.0), &records);
        assert_eq!(summary.streak, 1);
    }

    #[test]
    fn streak_survives_time_of_day_noise() {
        let records = vec![
            record("2024-01-01T08:12:00", 200.0),
            record("2024-01-02 23:59:59", 199.0),
            record("2024-01-03", 198.0),
        ];
        let summary = compute(&settings(200.0, 150.0), &records);
        assert_eq!(summary.streak, 3);
    }

    #[test]
    fn streak_breaks_on_unparseable_date() {
        let records = vec![
            record("not-a-date", 200.0),
            record("2024-01-02", 199.0),
            record("2024-01-03", 198.0),
        ];
        let summary = compute(&settings(200.0, 150.0), &records);
        assert_eq!(summary.streak, 2);
    }

    #[test]
    fn fewer_than_seven_records_skip_weekly_figures() {
        let records: Vec<_> = (1..=6)
            .map(|i| record(&format!("2024-01-{i:02}"), 200.0 - i as f64))
            .collect();
        let summary = compute(&settings(200.0, 150.0), &records);
        assert_eq!(summary.weekly_average, 0.0);
        assert_eq!(summary.best_week, 0.0);
    }

    #[test]
    fn best_week_never_goes_negative() {
        // Steady gain: every window loses nothing.
        let records: Vec<_> = (1..=14)
            .map(|i| record(&format!("2024-01-{i:02}"), 180.0 + i as f64))
            .collect();
        let summary = compute(&settings(200.0, 150.0), &records);
        assert_eq!(summary.best_week, 0.0);
    }

    #[test]
    fn remaining_clamps_at_zero_below_target() {
        let records = vec![record("2024-01-01", 148.0)];
        let summary = compute(&settings(200.0, 150.0), &records);
        assert_eq!(summary.remaining, 0.0);
        assert_eq!(summary.total_lost, 52.0);
    }

    #[test]
    fn outputs_round_to_one_decimal() {
        let records = vec![record("2024-01-01", 190.04)];
        let summary = compute(&settings(200.0, 150.0), &records);
        assert_eq!(summary.current_weight, 190.0);
        assert_eq!(summary.total_lost, 10.0);
        assert_eq!(summary.remaining, 40.0);
    }
}
