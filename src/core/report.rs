//! Report generation business logic.
//!
//! This module turns inputs and projections into display-ready labels, figures, and
//! text tables. All functions are framework-agnostic and return plain strings that the
//! bot layer places into embeds.

use crate::core::{
    format::{format_compact, format_currency, format_percent, format_years},
    projection::{CalculationInput, CalculationResult},
};

/// Share of `total_value` that comes from returns rather than contributions, in percent.
///
/// A non-positive total yields 0.
#[must_use]
pub fn returns_share(invested: f64, total_value: f64) -> f64 {
    if total_value <= 0.0 {
        return 0.0;
    }
    ((total_value - invested) / total_value) * 100.0
}

/// Generates a bar like `[████████░░] 80.0%`.
///
/// The bar is clamped to 0-100%; the printed figure is not.
#[must_use]
pub fn format_share_bar(percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percent.clamp(0.0, 100.0);

    // clamped ∈ [0, 100] and length is small, so the product fits in usize.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

/// Labelled input values, in the order a form would show them.
#[must_use]
pub fn input_fields(input: &CalculationInput) -> Vec<(&'static str, String)> {
    match input {
        CalculationInput::Sip(input) => vec![
            ("Monthly investment", format_currency(input.monthly_investment)),
            ("Duration", format_years(input.duration_years)),
            ("Expected return", format_percent(input.expected_return)),
        ],
        CalculationInput::SipStepUp(input) => vec![
            ("Starting monthly investment", format_currency(input.monthly_investment)),
            ("Annual step-up", format_percent(input.annual_increase)),
            ("Duration", format_years(input.duration_years)),
            ("Expected return", format_percent(input.expected_return)),
        ],
        CalculationInput::LumpSum(input) => vec![
            ("Investment", format_currency(input.investment)),
            ("Duration", format_years(input.duration_years)),
            ("Expected return", format_percent(input.expected_return)),
        ],
        CalculationInput::Swp(input) => vec![
            ("Starting corpus", format_currency(input.investment)),
            ("Monthly withdrawal", format_currency(input.monthly_withdrawal)),
            ("Duration", format_years(input.duration_years)),
            ("Expected return", format_percent(input.expected_return)),
        ],
    }
}

/// Labelled headline totals of a projection.
#[must_use]
pub fn summary_fields(result: &CalculationResult) -> Vec<(&'static str, String)> {
    match result {
        CalculationResult::Sip(r) => growth_summary(r.total_value, r.invested_amount, r.estimated_returns),
        CalculationResult::SipStepUp(r) => {
            growth_summary(r.total_value, r.invested_amount, r.estimated_returns)
        }
        CalculationResult::LumpSum(r) => {
            growth_summary(r.total_value, r.invested_amount, r.estimated_returns)
        }
        CalculationResult::Swp(r) => vec![
            ("Total withdrawn", format_currency(r.total_withdrawn)),
            ("Remaining corpus", format_currency(r.remaining_corpus)),
            ("Starting corpus", format_currency(r.invested_amount)),
            ("Total returns", format_currency(r.total_returns)),
        ],
    }
}

fn growth_summary(total_value: f64, invested: f64, returns: f64) -> Vec<(&'static str, String)> {
    vec![
        ("Total value", format_currency(total_value)),
        ("Invested", format_currency(invested)),
        ("Estimated returns", format_currency(returns)),
        (
            "Returns share",
            format_share_bar(returns_share(invested, total_value), None),
        ),
    ]
}

/// A one-line warning when an SWP corpus runs out within the projection.
#[must_use]
pub fn exhaustion_note(input: &CalculationInput, result: &CalculationResult) -> Option<String> {
    let CalculationResult::Swp(swp) = result else {
        return None;
    };
    let requested = input.duration_years();
    swp.exhausted_in_year()
        .map(|year| format!("⚠️ The corpus runs out during year {year} of {requested}."))
}

const SIP_HEADERS: &[&str] = &["Year", "Invested", "Value", "Returns"];
const STEP_UP_HEADERS: &[&str] = &["Year", "Monthly", "Invested", "Value"];
const LUMP_SUM_HEADERS: &[&str] = &["Year", "Value", "Returns"];
const SWP_HEADERS: &[&str] = &["Year", "Withdrawn", "Corpus", "Returns"];

fn breakdown_rows(result: &CalculationResult) -> (&'static [&'static str], Vec<Vec<String>>) {
    match result {
        CalculationResult::Sip(r) => (
            SIP_HEADERS,
            r.yearly_breakdown
                .iter()
                .map(|row| {
                    vec![
                        row.year.to_string(),
                        format_compact(row.invested),
                        format_compact(row.value),
                        format_compact(row.returns),
                    ]
                })
                .collect(),
        ),
        CalculationResult::SipStepUp(r) => (
            STEP_UP_HEADERS,
            r.yearly_breakdown
                .iter()
                .map(|row| {
                    vec![
                        row.year.to_string(),
                        format_compact(row.monthly_investment),
                        format_compact(row.invested),
                        format_compact(row.value),
                    ]
                })
                .collect(),
        ),
        CalculationResult::LumpSum(r) => (
            LUMP_SUM_HEADERS,
            r.yearly_breakdown
                .iter()
                .map(|row| {
                    vec![
                        row.year.to_string(),
                        format_compact(row.value),
                        format_compact(row.returns),
                    ]
                })
                .collect(),
        ),
        CalculationResult::Swp(r) => (
            SWP_HEADERS,
            r.yearly_breakdown
                .iter()
                .map(|row| {
                    vec![
                        row.year.to_string(),
                        format_compact(row.withdrawn),
                        format_compact(row.remaining_corpus),
                        format_compact(row.returns),
                    ]
                })
                .collect(),
        ),
    }
}

/// Renders the yearly breakdown as a right-aligned text table.
///
/// When there are more rows than `max_rows`, the first `max_rows - 1` rows are shown,
/// then an ellipsis row, then the final year.
#[must_use]
pub fn breakdown_table(result: &CalculationResult, max_rows: usize) -> String {
    let (headers, rows) = breakdown_rows(result);
    if rows.is_empty() {
        return "No yearly breakdown.".to_string();
    }

    let shown: Vec<Vec<String>> = if max_rows >= 2 && rows.len() > max_rows {
        let mut shown = rows[..max_rows - 1].to_vec();
        shown.push(vec!["…".to_string(); headers.len()]);
        shown.extend(rows.last().cloned());
        shown
    } else {
        rows
    };

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            shown
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut table = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    for row in std::iter::once(&header_cells).chain(shown.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:>width$}"))
            .collect();
        table.push_str(&line.join("  "));
        table.push('\n');
    }
    table
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::projection::{SipInput, SwpInput, calculate};

    fn swp(investment: f64, monthly_withdrawal: f64) -> CalculationInput {
        CalculationInput::Swp(SwpInput {
            investment,
            monthly_withdrawal,
            duration_years: 10,
            expected_return: 12.0,
        })
    }

    #[test]
    fn test_returns_share() {
        assert_eq!(returns_share(50.0, 100.0), 50.0);
        assert_eq!(returns_share(100.0, 100.0), 0.0);
        assert_eq!(returns_share(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_format_share_bar() {
        assert_eq!(format_share_bar(80.0, None), "[████████░░] 80.0%");
        assert_eq!(format_share_bar(0.0, Some(5)), "[░░░░░] 0.0%");
        assert_eq!(format_share_bar(150.0, Some(4)), "[████] 150.0%");
        assert_eq!(format_share_bar(-20.0, Some(4)), "[░░░░] -20.0%");
    }

    #[test]
    fn test_input_and_summary_fields() {
        let input = CalculationInput::Sip(SipInput {
            monthly_investment: 10_000.0,
            duration_years: 10,
            expected_return: 12.0,
        });
        let fields = input_fields(&input);
        assert_eq!(fields[0], ("Monthly investment", "₹10,000".to_string()));
        assert_eq!(fields[1].1, "10 years");

        let summary = summary_fields(&calculate(&input));
        assert_eq!(summary[0], ("Total value", "₹23,23,391".to_string()));
        assert_eq!(summary[1].1, "₹12,00,000");
    }

    #[test]
    fn test_breakdown_table_elides_middle_rows() {
        let input = CalculationInput::Sip(SipInput {
            monthly_investment: 10_000.0,
            duration_years: 10,
            expected_return: 12.0,
        });
        let table = breakdown_table(&calculate(&input), 4);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 1 + 4 + 1);
        assert!(lines[0].trim_start().starts_with("Year"));
        assert!(lines[4].contains('…'));
        assert!(lines[5].trim_start().starts_with("10"));
    }

    #[test]
    fn test_breakdown_table_columns_line_up() {
        let table = breakdown_table(&calculate(&swp(1_000_000.0, 10_000.0)), 20);
        assert!(table.ends_with('\n'));
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths.len(), 11);
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_exhaustion_note_only_when_corpus_runs_out() {
        let lasting = swp(1_000_000.0, 10_000.0);
        assert_eq!(exhaustion_note(&lasting, &calculate(&lasting)), None);

        let draining = swp(1_000_000.0, 20_000.0);
        assert_eq!(
            exhaustion_note(&draining, &calculate(&draining)),
            Some("⚠️ The corpus runs out during year 6 of 10.".to_string())
        );
    }
}
