//! SWP projection - fixed monthly withdrawals from a corpus earning a monthly rate.
//!
//! The simulation runs month by month. The instant the corpus would go negative it is
//! clamped to zero, the rest of that year is skipped, and no further years are emitted.
//! A result can therefore hold fewer rows than the requested duration.

use super::{MONTHS_PER_YEAR, monthly_rate};
use serde::{Deserialize, Serialize};

/// Inputs for an SWP projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpInput {
    /// Starting corpus
    pub investment: f64,
    pub monthly_withdrawal: f64,
    #[serde(deserialize_with = "super::whole_years")]
    pub duration_years: u32,
    /// Expected annual return in percent
    pub expected_return: f64,
}

/// One year of an SWP projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpYear {
    pub year: u32,
    /// Total withdrawn up to the end of this year
    pub withdrawn: f64,
    /// Corpus left at the end of this year, never negative
    pub remaining_corpus: f64,
    /// `withdrawn + remaining_corpus - investment`; may be negative
    pub returns: f64,
}

/// Complete SWP projection. Totals mirror the last emitted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpResult {
    pub total_withdrawn: f64,
    pub remaining_corpus: f64,
    pub invested_amount: f64,
    pub total_returns: f64,
    pub yearly_breakdown: Vec<SwpYear>,
}

impl SwpResult {
    /// Year in which the corpus ran out, if it did.
    #[must_use]
    pub fn exhausted_in_year(&self) -> Option<u32> {
        self.yearly_breakdown
            .last()
            .filter(|row| row.remaining_corpus <= 0.0)
            .map(|row| row.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CorpusPhase {
    Withdrawing,
    Exhausted,
}

/// Running state of the withdrawal simulation.
#[derive(Debug)]
struct WithdrawalState {
    corpus: f64,
    total_withdrawn: f64,
    phase: CorpusPhase,
}

impl WithdrawalState {
    const fn new(investment: f64) -> Self {
        Self {
            corpus: investment,
            total_withdrawn: 0.0,
            phase: CorpusPhase::Withdrawing,
        }
    }

    /// Grows the corpus for one month, then takes the withdrawal.
    fn advance_month(&mut self, rate: f64, withdrawal: f64) {
        self.corpus = self.corpus * (1.0 + rate) - withdrawal;
        self.total_withdrawn += withdrawal;

        if self.corpus < 0.0 {
            self.corpus = 0.0;
            self.phase = CorpusPhase::Exhausted;
        }
    }

    fn is_exhausted(&self) -> bool {
        self.phase == CorpusPhase::Exhausted
    }

    fn returns(&self, investment: f64) -> f64 {
        self.total_withdrawn + self.corpus - investment
    }
}

/// Projects an SWP year by year, stopping early if the corpus runs out.
#[must_use]
pub fn project(input: &SwpInput) -> SwpResult {
    let rate = monthly_rate(input.expected_return);
    let mut state = WithdrawalState::new(input.investment);
    let mut yearly_breakdown = Vec::new();

    for year in 1..=input.duration_years {
        for _month in 0..MONTHS_PER_YEAR {
            state.advance_month(rate, input.monthly_withdrawal);
            if state.is_exhausted() {
                break;
            }
        }

        yearly_breakdown.push(SwpYear {
            year,
            withdrawn: state.total_withdrawn,
            remaining_corpus: state.corpus,
            returns: state.returns(input.investment),
        });

        // A corpus that lands exactly on zero also ends the plan.
        if state.corpus <= 0.0 {
            break;
        }
    }

    SwpResult {
        total_withdrawn: state.total_withdrawn,
        remaining_corpus: state.corpus,
        invested_amount: input.investment,
        total_returns: state.returns(input.investment),
        yearly_breakdown,
    }
}
