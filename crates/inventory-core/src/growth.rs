//! Cumulative growth aggregation over raw installation-date strings.
//!
//! Installation dates in the source sheet are free-form text: ISO dates,
//! day/month/year dates, "March 2023"-style phrases, bare years, or nothing
//! at all. This module normalizes each string to a `(year, month)` period
//! through an ordered cascade of matchers and folds the periods into sorted
//! monthly and yearly timeseries with a running cumulative total.
//!
//! Records whose date cannot be normalized form the *baseline*: they are
//! treated as existing before the observed timeline and seed the cumulative
//! totals instead of occupying a period bucket. Parsing never fails; every
//! record lands in exactly one monthly bucket or in the baseline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ── Accepted period window ────────────────────────────────────────────────────

/// Years outside this window are treated as sheet garbage (typos, OCR noise)
/// and routed to the baseline.
const MIN_YEAR: i32 = 1990;
const MAX_YEAR: i32 = 2030;

/// English month names and three-letter abbreviations, lowercase.
const MONTH_NAMES: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

/// Resolve a lowercase month name or 3-letter abbreviation to its number.
fn month_from_name(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, m)| *m)
}

// ── ParsedPeriod ──────────────────────────────────────────────────────────────

/// A year-month period recovered from a raw date string.
///
/// `month` is 1 when only a year could be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedPeriod {
    pub year: i32,
    pub month: u32,
}

impl ParsedPeriod {
    /// The zero-padded `"YYYY-MM"` bucket key. Lexicographic order on these
    /// keys equals chronological order within the accepted year window.
    pub fn bucket_key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

// ── PeriodParser ──────────────────────────────────────────────────────────────

/// Ordered cascade of date matchers; the first rule that matches wins.
///
/// Matching is case-insensitive and ignores leading/trailing whitespace.
/// A match is only accepted when the extracted period falls inside the
/// `1990..=2030` year window with a month in `1..=12`; anything else is
/// reported as unparseable (`None`), never as an error.
pub struct PeriodParser {
    /// `YYYY-MM-DD` or `YYYY/MM/DD` (separators may mix).
    re_iso: Regex,
    /// `DD-MM-YYYY` or `DD/MM/YYYY`.
    re_dmy: Regex,
    /// A month word, an optional day number, then a 4-digit year,
    /// e.g. "March 2023", "Aug-2021", "march 15, 2023".
    re_text: Regex,
    /// Bare standalone 4-digit year fallback.
    re_year: Regex,
}

impl Default for PeriodParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodParser {
    pub fn new() -> Self {
        Self {
            re_iso: Regex::new(r"(\d{4})[-/](\d{1,2})[-/](\d{1,2})").expect("regex is valid"),
            re_dmy: Regex::new(r"(\d{1,2})[-/](\d{1,2})[-/](\d{4})").expect("regex is valid"),
            re_text: Regex::new(r"([a-z]+)[,\s-]+\d{0,2}[,\s-]*(\d{4})").expect("regex is valid"),
            re_year: Regex::new(r"\b(\d{4})\b").expect("regex is valid"),
        }
    }

    /// Normalize one raw date string to a period, or `None` for baseline.
    pub fn parse(&self, raw: &str) -> Option<ParsedPeriod> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }

        let period = self
            .match_iso(&text)
            .or_else(|| self.match_dmy(&text))
            .or_else(|| self.match_text(&text))
            .or_else(|| self.match_bare_year(&text))?;

        if Self::in_window(period) {
            Some(period)
        } else {
            None
        }
    }

    // ── Matchers, tried in order ──────────────────────────────────────────────

    fn match_iso(&self, text: &str) -> Option<ParsedPeriod> {
        let caps = self.re_iso.captures(text)?;
        Some(ParsedPeriod {
            year: caps[1].parse().ok()?,
            month: caps[2].parse().ok()?,
        })
    }

    fn match_dmy(&self, text: &str) -> Option<ParsedPeriod> {
        let caps = self.re_dmy.captures(text)?;
        Some(ParsedPeriod {
            year: caps[3].parse().ok()?,
            month: caps[2].parse().ok()?,
        })
    }

    fn match_text(&self, text: &str) -> Option<ParsedPeriod> {
        let caps = self.re_text.captures(text)?;
        // An unrecognized word means this rule does not match at all; the
        // bare-year fallback still gets its chance.
        let month = month_from_name(&caps[1])?;
        Some(ParsedPeriod {
            year: caps[2].parse().ok()?,
            month,
        })
    }

    /// January fallback: the first standalone in-window 4-digit number.
    fn match_bare_year(&self, text: &str) -> Option<ParsedPeriod> {
        self.re_year
            .captures_iter(text)
            .filter_map(|caps| caps[1].parse::<i32>().ok())
            .find(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
            .map(|year| ParsedPeriod { year, month: 1 })
    }

    fn in_window(period: ParsedPeriod) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&period.year) && (1..=12).contains(&period.month)
    }
}

// ── GrowthPoint / GrowthSeries ────────────────────────────────────────────────

/// One emitted timeseries entry (monthly or yearly).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    /// Human-readable period label: `"Mar 2023"` (monthly) or `"2023"`.
    pub label: String,
    /// Records whose date normalized into this period.
    pub added: u64,
    /// Running cumulative count including the baseline offset.
    pub total: u64,
}

/// Sorted cumulative-growth output of [`GrowthAggregator::aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthSeries {
    /// Monthly points, ascending by period.
    pub monthly: Vec<GrowthPoint>,
    /// Yearly points, ascending by year.
    pub yearly: Vec<GrowthPoint>,
    /// Records with a missing or unparseable date, counted as present
    /// before the first observed period.
    pub baseline: u64,
}

// ── GrowthAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that folds raw date strings into growth timeseries.
pub struct GrowthAggregator;

impl GrowthAggregator {
    /// Aggregate one date string per active record into monthly and yearly
    /// cumulative series.
    ///
    /// `total_records` is the number of active records the strings were
    /// drawn from; the difference between it and the number of successfully
    /// parsed dates becomes the baseline. A mismatched count cannot make the
    /// baseline negative: it is clamped at zero.
    ///
    /// Input order does not affect the output, and the computation is pure:
    /// the same input always yields the same series.
    pub fn aggregate<I, S>(dates: I, total_records: u64) -> GrowthSeries
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parser = PeriodParser::new();

        // BTreeMap keys are already in chronological order (zero-padded
        // months, 4-digit years).
        let mut monthly_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut parsed_count: u64 = 0;

        for raw in dates {
            if let Some(period) = parser.parse(raw.as_ref()) {
                *monthly_counts.entry(period.bucket_key()).or_insert(0) += 1;
                parsed_count += 1;
            }
        }

        let baseline = total_records.saturating_sub(parsed_count);

        let mut monthly = Vec::with_capacity(monthly_counts.len());
        let mut yearly_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut cumulative = baseline;

        for (key, &added) in &monthly_counts {
            cumulative += added;
            monthly.push(GrowthPoint {
                label: month_label(key),
                added,
                total: cumulative,
            });
            *yearly_counts.entry(key[..4].to_string()).or_insert(0) += added;
        }

        let mut yearly = Vec::with_capacity(yearly_counts.len());
        let mut cumulative = baseline;
        for (year, &added) in &yearly_counts {
            cumulative += added;
            yearly.push(GrowthPoint {
                label: year.clone(),
                added,
                total: cumulative,
            });
        }

        GrowthSeries {
            monthly,
            yearly,
            baseline,
        }
    }
}

/// Turn a `"YYYY-MM"` bucket key into a `"Mon YYYY"` display label.
fn month_label(key: &str) -> String {
    let parsed = key.split_once('-').and_then(|(y, m)| {
        let year: i32 = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)
    });
    match parsed {
        Some(date) => date.format("%b %Y").to_string(),
        // Keys are produced by the parser, so this branch is unreachable in
        // practice; fall back to the raw key rather than panic.
        None => key.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<ParsedPeriod> {
        PeriodParser::new().parse(raw)
    }

    fn period(year: i32, month: u32) -> ParsedPeriod {
        ParsedPeriod { year, month }
    }

    // ── PeriodParser: rule 1 (empty) ──────────────────────────────────────────

    #[test]
    fn test_parse_empty_string() {
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert_eq!(parse("   \t "), None);
    }

    // ── PeriodParser: rule 2 (ISO) ────────────────────────────────────────────

    #[test]
    fn test_parse_iso_dashes() {
        assert_eq!(parse("2023-01-15"), Some(period(2023, 1)));
    }

    #[test]
    fn test_parse_iso_slashes() {
        assert_eq!(parse("2021/06/30"), Some(period(2021, 6)));
    }

    #[test]
    fn test_parse_iso_single_digit_month() {
        assert_eq!(parse("2022-7-4"), Some(period(2022, 7)));
    }

    #[test]
    fn test_parse_iso_embedded_in_text() {
        // The matchers scan, they do not anchor.
        assert_eq!(parse("installed on 2020-11-02 by ops"), Some(period(2020, 11)));
    }

    #[test]
    fn test_parse_iso_with_surrounding_whitespace() {
        assert_eq!(parse("  2023-03-09  "), Some(period(2023, 3)));
    }

    // ── PeriodParser: rule 3 (DMY) ────────────────────────────────────────────

    #[test]
    fn test_parse_dmy_slashes() {
        assert_eq!(parse("15/03/2022"), Some(period(2022, 3)));
    }

    #[test]
    fn test_parse_dmy_dashes() {
        assert_eq!(parse("01-12-2019"), Some(period(2019, 12)));
    }

    #[test]
    fn test_parse_iso_takes_precedence_over_dmy() {
        // Rule order, not specificity: the ISO matcher runs first.
        assert_eq!(parse("2023-01-15"), Some(period(2023, 1)));
    }

    // ── PeriodParser: rule 4 (month name) ─────────────────────────────────────

    #[test]
    fn test_parse_full_month_name() {
        assert_eq!(parse("March 2023"), Some(period(2023, 3)));
    }

    #[test]
    fn test_parse_abbreviated_month_name() {
        assert_eq!(parse("Aug-2021"), Some(period(2021, 8)));
    }

    #[test]
    fn test_parse_month_name_case_insensitive() {
        assert_eq!(parse("DECEMBER 2020"), Some(period(2020, 12)));
    }

    #[test]
    fn test_parse_month_name_with_day() {
        assert_eq!(parse("March 15, 2023"), Some(period(2023, 3)));
    }

    #[test]
    fn test_parse_unknown_word_falls_through_to_bare_year() {
        // "Quarter" is not a month, so rule 4 does not match and the bare
        // year fallback assigns January.
        assert_eq!(parse("Quarter 2021"), Some(period(2021, 1)));
    }

    // ── PeriodParser: rule 5 (bare year) ──────────────────────────────────────

    #[test]
    fn test_parse_bare_year() {
        assert_eq!(parse("2021"), Some(period(2021, 1)));
    }

    #[test]
    fn test_parse_bare_year_in_text() {
        assert_eq!(parse("sometime in 2018 maybe"), Some(period(2018, 1)));
    }

    #[test]
    fn test_parse_bare_year_skips_out_of_window_numbers() {
        // 1234 is standalone but outside the window; 2021 is accepted.
        assert_eq!(parse("1234 2021"), Some(period(2021, 1)));
    }

    #[test]
    fn test_parse_five_digit_number_is_not_a_year() {
        assert_eq!(parse("20211"), None);
    }

    // ── PeriodParser: rule 6 / validity guard ─────────────────────────────────

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse("not a date"), None);
    }

    #[test]
    fn test_parse_year_below_window() {
        assert_eq!(parse("1989-05-01"), None);
    }

    #[test]
    fn test_parse_year_above_window() {
        assert_eq!(parse("2099-01-01"), None);
    }

    #[test]
    fn test_parse_window_bounds_inclusive() {
        assert_eq!(parse("1990-01-01"), Some(period(1990, 1)));
        assert_eq!(parse("2030-12-31"), Some(period(2030, 12)));
    }

    #[test]
    fn test_parse_invalid_month_rejected() {
        // Matched by the ISO rule but the guard rejects month 13; the
        // cascade does not re-enter later rules.
        assert_eq!(parse("2023-13-05"), None);
    }

    #[test]
    fn test_parse_month_zero_rejected() {
        assert_eq!(parse("2023-00-05"), None);
    }

    // ── bucket keys / labels ──────────────────────────────────────────────────

    #[test]
    fn test_bucket_key_zero_pads_month() {
        assert_eq!(period(2023, 4).bucket_key(), "2023-04");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("2023-01"), "Jan 2023");
        assert_eq!(month_label("2021-11"), "Nov 2021");
    }

    #[test]
    fn test_month_label_bad_key_falls_back() {
        assert_eq!(month_label("garbage"), "garbage");
    }

    // ── GrowthAggregator: representative sheet dates ──────────────────────────

    #[test]
    fn test_aggregate_two_parsed_one_missing() {
        let series = GrowthAggregator::aggregate(["2023-01-15", "2023-01-20", ""], 3);
        assert_eq!(series.baseline, 1);
        assert_eq!(series.monthly.len(), 1);
        assert_eq!(series.monthly[0].label, "Jan 2023");
        assert_eq!(series.monthly[0].added, 2);
        assert_eq!(series.monthly[0].total, 3);
    }

    #[test]
    fn test_aggregate_merges_formats_into_one_bucket() {
        let series = GrowthAggregator::aggregate(["15/03/2022", "March 2022"], 2);
        assert_eq!(series.baseline, 0);
        assert_eq!(series.monthly.len(), 1);
        assert_eq!(series.monthly[0].label, "Mar 2022");
        assert_eq!(series.monthly[0].added, 2);
        assert_eq!(series.monthly[0].total, 2);
    }

    #[test]
    fn test_aggregate_rejects_garbage_and_out_of_window() {
        let series = GrowthAggregator::aggregate(["not a date", "2099-01-01"], 2);
        assert_eq!(series.baseline, 2);
        assert!(series.monthly.is_empty());
        assert!(series.yearly.is_empty());
    }

    #[test]
    fn test_aggregate_bare_year_sorts_before_explicit_month() {
        let series = GrowthAggregator::aggregate(["2021", "2021-06-01"], 2);
        assert_eq!(series.baseline, 0);
        assert_eq!(series.monthly.len(), 2);
        assert_eq!(series.monthly[0].label, "Jan 2021");
        assert_eq!(series.monthly[0].added, 1);
        assert_eq!(series.monthly[0].total, 1);
        assert_eq!(series.monthly[1].label, "Jun 2021");
        assert_eq!(series.monthly[1].added, 1);
        assert_eq!(series.monthly[1].total, 2);
        assert_eq!(series.yearly.len(), 1);
        assert_eq!(series.yearly[0].label, "2021");
        assert_eq!(series.yearly[0].added, 2);
        assert_eq!(series.yearly[0].total, 2);
    }

    #[test]
    fn test_aggregate_empty_input() {
        let series = GrowthAggregator::aggregate(Vec::<String>::new(), 0);
        assert_eq!(series.baseline, 0);
        assert!(series.monthly.is_empty());
        assert!(series.yearly.is_empty());
    }

    // ── GrowthAggregator: properties ──────────────────────────────────────────

    #[test]
    fn test_every_record_counted_exactly_once() {
        let dates = [
            "2023-01-15",
            "15/03/2022",
            "March 2022",
            "2021",
            "",
            "not a date",
            "2099-01-01",
        ];
        let total = dates.len() as u64;
        let series = GrowthAggregator::aggregate(dates, total);

        let added_sum: u64 = series.monthly.iter().map(|p| p.added).sum();
        assert_eq!(added_sum + series.baseline, total);
    }

    #[test]
    fn test_monthly_and_yearly_reach_same_final_total() {
        let dates = ["2020-05-01", "2021-02-01", "2021-09-01", "", "junk"];
        let series = GrowthAggregator::aggregate(dates, dates.len() as u64);

        let last_monthly = series.monthly.last().unwrap().total;
        let last_yearly = series.yearly.last().unwrap().total;
        assert_eq!(last_monthly, last_yearly);
        assert_eq!(last_monthly, dates.len() as u64);
    }

    #[test]
    fn test_totals_non_decreasing_and_labels_ascending() {
        let dates = [
            "2022-12-01",
            "2020-01-05",
            "Aug 2021",
            "2020-01-09",
            "2023/02/14",
        ];
        let series = GrowthAggregator::aggregate(dates, dates.len() as u64);

        let mut prev_total = series.baseline;
        for point in &series.monthly {
            assert!(point.total >= prev_total);
            assert_eq!(point.total, prev_total + point.added);
            prev_total = point.total;
        }

        let years: Vec<&str> = series.yearly.iter().map(|p| p.label.as_str()).collect();
        let mut sorted = years.clone();
        sorted.sort();
        assert_eq!(years, sorted);
    }

    #[test]
    fn test_aggregate_order_independent_and_idempotent() {
        let forward = ["2021-03-01", "May 2020", "", "2022"];
        let reversed = ["2022", "", "May 2020", "2021-03-01"];

        let a = GrowthAggregator::aggregate(forward, 4);
        let b = GrowthAggregator::aggregate(reversed, 4);
        let c = GrowthAggregator::aggregate(forward, 4);

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_aggregate_first_total_includes_baseline() {
        let series = GrowthAggregator::aggregate(["junk", "junk", "2020-06-01"], 3);
        assert_eq!(series.baseline, 2);
        assert_eq!(series.monthly[0].total, 3);
        assert_eq!(series.yearly[0].total, 3);
    }

    #[test]
    fn test_aggregate_baseline_clamped_at_zero() {
        // More parsed dates than the caller-supplied record count; the
        // baseline clamps instead of wrapping.
        let series = GrowthAggregator::aggregate(["2021-01-01", "2021-02-01"], 1);
        assert_eq!(series.baseline, 0);
        assert_eq!(series.monthly.last().unwrap().total, 2);
    }

    #[test]
    fn test_aggregate_total_larger_than_inputs() {
        // The caller may hold records whose dates were not supplied; they
        // all count toward the baseline.
        let series = GrowthAggregator::aggregate(["2021-01-01"], 10);
        assert_eq!(series.baseline, 9);
        assert_eq!(series.monthly[0].total, 10);
    }

    #[test]
    fn test_aggregate_yearly_sums_months() {
        let dates = ["2021-01-01", "2021-06-01", "2021-11-01", "2022-02-01"];
        let series = GrowthAggregator::aggregate(dates, 4);

        assert_eq!(series.monthly.len(), 4);
        assert_eq!(series.yearly.len(), 2);
        assert_eq!(series.yearly[0].label, "2021");
        assert_eq!(series.yearly[0].added, 3);
        assert_eq!(series.yearly[0].total, 3);
        assert_eq!(series.yearly[1].label, "2022");
        assert_eq!(series.yearly[1].added, 1);
        assert_eq!(series.yearly[1].total, 4);
    }
}
