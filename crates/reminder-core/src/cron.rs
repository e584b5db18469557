//! Five-field cron expression parsing and next-occurrence evaluation.
//!
//! Fields are `minute hour day-of-month month day-of-week`, each a
//! comma-separated list of literals, ranges (`a-b`), steps (`*/n`,
//! `a-b/n`), or the wildcard `*`. Day-of-month and day-of-week combine
//! disjunctively when both are restricted, matching standard cron
//! semantics (and `croniter`, which the original implementation used).

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike};
use std::fmt;

const FIELD_NAMES: [&str; 5] = ["minute", "hour", "day-of-month", "month", "day-of-week"];
const FIELD_BOUNDS: [(u32, u32); 5] = [(0, 59), (0, 23), (1, 31), (1, 12), (0, 7)];

/// A single malformed field, with enough context to report precisely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field {field_index} ({field_name}): token '{token}' — {reason}")]
pub struct ParseError {
    pub field_index: usize,
    pub field_name: &'static str,
    pub token: String,
    pub reason: String,
}

/// The bounded next-occurrence search exhausted without finding a match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no occurrence of this schedule exists within the search horizon")]
pub struct UnsatisfiableError;

/// How far forward `next_after` is willing to search before giving up.
/// Doubles as a safety cutoff for unsatisfiable combinations like
/// `31 * 2 * *` (no February has a 31st).
const MAX_SEARCH_YEARS: i64 = 4;

/// An immutable, validated 5-field cron expression.
///
/// Each field is stored as the expanded set of permitted integers rather
/// than the original syntax, so matching is a plain lookup.
#[derive(Clone, PartialEq, Eq)]
pub struct CronExpression {
    minute: [bool; 60],
    hour: [bool; 24],
    day_of_month: [bool; 32],
    month: [bool; 13],
    day_of_week: [bool; 7],
    dom_wildcard: bool,
    dow_wildcard: bool,
    source: String,
}

impl fmt::Debug for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CronExpression")
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse a 5-field cron expression.
pub fn parse(expr: &str) -> Result<CronExpression, ParseError> {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    if fields.len() != 5 {
        let bad = fields.len().min(4);
        return Err(ParseError {
            field_index: bad,
            field_name: FIELD_NAMES[bad],
            token: expr.to_string(),
            reason: format!("expected 5 space-separated fields, got {}", fields.len()),
        });
    }

    let minute = expand_bool::<60>(fields[0], 0, FIELD_BOUNDS[0], 0)?;
    let hour = expand_bool::<24>(fields[1], 1, FIELD_BOUNDS[1], 0)?;
    let day_of_month = expand_bool::<32>(fields[2], 2, FIELD_BOUNDS[2], 0)?;
    let month = expand_bool::<13>(fields[3], 3, FIELD_BOUNDS[3], 0)?;
    // Day-of-week accepts 0..=7, with 7 normalized onto 0 (Sunday).
    let day_of_week = expand_bool::<7>(fields[4], 4, FIELD_BOUNDS[4], 7)?;

    Ok(CronExpression {
        minute: minute.0,
        hour: hour.0,
        day_of_month: day_of_month.0,
        month: month.0,
        day_of_week: day_of_week.0,
        dom_wildcard: fields[2] == "*",
        dow_wildcard: fields[4] == "*",
        source: expr.to_string(),
    })
}

/// Expand a field into a fixed-size membership array. `wrap_high`, when
/// non-zero, folds that value onto index 0 (used for day-of-week's `7`).
fn expand_bool<const N: usize>(
    field: &str,
    field_index: usize,
    (min, max): (u32, u32),
    wrap_high: u32,
) -> Result<BoolArray<N>, ParseError> {
    let field_name = FIELD_NAMES[field_index];
    let mut set = [false; N];
    for part in field.split(',') {
        for v in parse_part(part, field_index, field_name, min, max)? {
            let idx = if wrap_high != 0 && v == wrap_high { 0 } else { v };
            if (idx as usize) < N {
                set[idx as usize] = true;
            }
        }
    }
    Ok(BoolArray(set))
}

struct BoolArray<const N: usize>([bool; N]);

fn parse_part(
    part: &str,
    field_index: usize,
    field_name: &'static str,
    min: u32,
    max: u32,
) -> Result<Vec<u32>, ParseError> {
    let err = |token: &str, reason: String| ParseError {
        field_index,
        field_name,
        token: token.to_string(),
        reason,
    };

    if part == "*" {
        return Ok((min..=max).collect());
    }

    if let Some(step_str) = part.strip_prefix("*/") {
        let step: u32 = step_str
            .parse()
            .map_err(|_| err(part, "expected a number after '*/'".into()))?;
        if step == 0 {
            return Err(err(part, "step must be greater than 0".into()));
        }
        return Ok((min..=max).filter(|v| (v - min) % step == 0).collect());
    }

    if let Some((range_part, step_str)) = part.split_once('/') {
        let (start, end) = parse_range(range_part, &err)?;
        let step: u32 = step_str
            .parse()
            .map_err(|_| err(part, "expected a number after '/'".into()))?;
        if step == 0 {
            return Err(err(part, "step must be greater than 0".into()));
        }
        check_bounds(start, end, min, max, part, &err)?;
        return Ok((start..=end).step_by(step as usize).collect());
    }

    if part.contains('-') {
        let (start, end) = parse_range(part, &err)?;
        check_bounds(start, end, min, max, part, &err)?;
        return Ok((start..=end).collect());
    }

    let n: u32 = part
        .parse()
        .map_err(|_| err(part, "expected an integer, range, or '*'".into()))?;
    if n < min || n > max {
        return Err(err(part, format!("value {n} out of range {min}..={max}")));
    }
    Ok(vec![n])
}

fn parse_range(
    part: &str,
    err: &impl Fn(&str, String) -> ParseError,
) -> Result<(u32, u32), ParseError> {
    let (start_s, end_s) = part
        .split_once('-')
        .ok_or_else(|| err(part, "expected a range 'a-b'".into()))?;
    let start: u32 = start_s
        .parse()
        .map_err(|_| err(part, format!("invalid range start '{start_s}'")))?;
    let end: u32 = end_s
        .parse()
        .map_err(|_| err(part, format!("invalid range end '{end_s}'")))?;
    if start > end {
        return Err(err(part, format!("range start {start} > end {end}")));
    }
    Ok((start, end))
}

fn check_bounds(
    start: u32,
    end: u32,
    min: u32,
    max: u32,
    part: &str,
    err: &impl Fn(&str, String) -> ParseError,
) -> Result<(), ParseError> {
    if start < min || end > max {
        return Err(err(
            part,
            format!("range {start}-{end} out of bounds {min}..={max}"),
        ));
    }
    Ok(())
}

impl CronExpression {
    /// The literal text this expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `dt` satisfies all five field constraints.
    pub fn matches<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> bool {
        if !self.minute[dt.minute() as usize] || !self.hour[dt.hour() as usize] {
            return false;
        }
        if !self.month[dt.month() as usize] {
            return false;
        }
        let dom_ok = self.day_of_month[dt.day() as usize];
        let dow_ok = self.day_of_week[dt.weekday().num_days_from_sunday() as usize];
        day_matches(self.dom_wildcard, self.dow_wildcard, dom_ok, dow_ok)
    }

    /// Compute the next instant strictly greater than `from` that
    /// satisfies this schedule, with seconds zeroed. Bounded to
    /// [`MAX_SEARCH_YEARS`] to fail fast on unsatisfiable schedules.
    pub fn next_after<Tz: TimeZone>(
        &self,
        from: &DateTime<Tz>,
    ) -> Result<DateTime<Tz>, UnsatisfiableError> {
        let mut candidate = (from.clone() + Duration::minutes(1))
            .with_second(0)
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or_else(|| from.clone() + Duration::minutes(1));

        let max_checks = MAX_SEARCH_YEARS * 366 * 24 * 60;
        for _ in 0..max_checks {
            if self.matches(&candidate) {
                return Ok(candidate);
            }
            candidate += Duration::minutes(1);
        }
        Err(UnsatisfiableError)
    }
}

/// Standard cron day-matching: when both day-of-month and day-of-week are
/// restricted, a day matches if either matches (OR). When only one is
/// restricted, the wildcarded field contributes no restriction.
fn day_matches(dom_wildcard: bool, dow_wildcard: bool, dom_ok: bool, dow_ok: bool) -> bool {
    match (dom_wildcard, dow_wildcard) {
        (true, true) => true,
        (true, false) => dow_ok,
        (false, true) => dom_ok,
        (false, false) => dom_ok || dow_ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn parses_every_field_kind() {
        assert!(parse("* * * * *").is_ok());
        assert!(parse("0 * * * *").is_ok());
        assert!(parse("*/20 * * * *").is_ok());
        assert!(parse("30 9-17 * * 1-5").is_ok());
        assert!(parse("0 0 1 1 *").is_ok());
        assert!(parse("0,15,30,45 * * * *").is_ok());
        assert!(parse("0 9 1,15 * */2").is_ok());
    }

    #[test]
    fn rejects_wrong_field_count() {
        let e = parse("* * *").unwrap_err();
        assert_eq!(e.field_name, "day-of-week");
    }

    #[test]
    fn rejects_out_of_range_and_reports_field() {
        let e = parse("60 * * * *").unwrap_err();
        assert_eq!(e.field_index, 0);
        assert_eq!(e.field_name, "minute");

        let e = parse("* 24 * * *").unwrap_err();
        assert_eq!(e.field_index, 1);

        let e = parse("* * 0 * *").unwrap_err();
        assert_eq!(e.field_index, 2);

        let e = parse("* * * 13 *").unwrap_err();
        assert_eq!(e.field_index, 3);
    }

    #[test]
    fn day_of_week_seven_normalizes_to_sunday() {
        let expr = parse("0 0 * * 7").unwrap();
        let sunday = dt(2024, 6, 16, 0, 0);
        assert!(expr.matches(&sunday));
    }

    #[test]
    fn rejects_malformed_step() {
        assert!(parse("*/0 * * * *").is_err());
        assert!(parse("abc * * * *").is_err());
    }

    #[test]
    fn matches_every_20_minutes() {
        let expr = parse("*/20 * * * *").unwrap();
        assert!(expr.matches(&dt(2024, 6, 15, 10, 0)));
        assert!(expr.matches(&dt(2024, 6, 15, 10, 20)));
        assert!(expr.matches(&dt(2024, 6, 15, 10, 40)));
        assert!(!expr.matches(&dt(2024, 6, 15, 10, 5)));
    }

    #[test]
    fn next_after_every_20_minutes() {
        let expr = parse("*/20 * * * *").unwrap();
        let next = expr.next_after(&dt(2024, 6, 15, 12, 5)).unwrap();
        assert_eq!((next.hour(), next.minute()), (12, 20));

        let next = expr.next_after(&dt(2024, 6, 15, 12, 59)).unwrap();
        assert_eq!((next.hour(), next.minute()), (13, 0));
    }

    #[test]
    fn next_after_top_of_hour() {
        let expr = parse("0 * * * *").unwrap();
        let next = expr.next_after(&dt(2024, 6, 15, 12, 30)).unwrap();
        assert_eq!((next.hour(), next.minute()), (13, 0));
    }

    #[test]
    fn next_after_is_strictly_greater() {
        let expr = parse("0 * * * *").unwrap();
        let from = dt(2024, 6, 15, 13, 0);
        let next = expr.next_after(&from).unwrap();
        assert!(next > from);
    }

    #[test]
    fn monotonic_next_after() {
        let expr = parse("30 9-17 * * 1-5").unwrap();
        let t1 = dt(2024, 6, 17, 9, 0); // Monday
        let t2 = dt(2024, 6, 17, 9, 30);
        let n1 = expr.next_after(&t1).unwrap();
        let n2 = expr.next_after(&t2).unwrap();
        assert!(n2 >= n1);
    }

    #[test]
    fn dom_dow_disjunction_or() {
        // Matches the 1st OR a Monday — both restricted.
        let expr = parse("0 0 1 * 1").unwrap();
        assert!(expr.matches(&dt(2024, 6, 1, 0, 0))); // Saturday the 1st
        assert!(expr.matches(&dt(2024, 6, 17, 0, 0))); // a Monday, not the 1st
        assert!(!expr.matches(&dt(2024, 6, 18, 0, 0))); // neither
    }

    #[test]
    fn dom_wildcard_means_dow_only_restricts() {
        let expr = parse("0 0 * * 1").unwrap();
        assert!(expr.matches(&dt(2024, 6, 17, 0, 0))); // Monday
        assert!(!expr.matches(&dt(2024, 6, 18, 0, 0))); // Tuesday
    }

    #[test]
    fn unsatisfiable_schedule_fails_fast() {
        // February never has a 31st.
        let expr = parse("0 0 31 2 *").unwrap();
        let result = expr.next_after(&dt(2024, 1, 1, 0, 0));
        assert!(result.is_err());
    }

    #[test]
    fn display_and_source_round_trip() {
        let expr = parse("30 9-17 * * 1-5").unwrap();
        assert_eq!(expr.source(), "30 9-17 * * 1-5");
        assert_eq!(expr.to_string(), "30 9-17 * * 1-5");
    }
}
