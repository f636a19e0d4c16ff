//! Calculator presets - the default inputs offered by every calculator.
//!
//! Presets are used when a bot command omits an argument and are served to API clients.
//! They can be overridden from the `[presets]` table of config.toml, keyed by calculator
//! wire name:
//!
//! ```toml
//! [presets.sip]
//! monthlyInvestment = 5000
//! durationYears = 15
//! expectedReturn = 11
//! ```

use crate::{
    core::{
        projection::{
            CalculationInput, CalculatorType, LumpSumInput, SipInput, SipStepUpInput, SwpInput,
        },
        validation::validate,
    },
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// Default inputs for each calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorPresets {
    pub sip: SipInput,
    #[serde(rename = "sip-stepup")]
    pub step_up: SipStepUpInput,
    #[serde(rename = "lumpsum")]
    pub lump_sum: LumpSumInput,
    pub swp: SwpInput,
}

impl Default for CalculatorPresets {
    fn default() -> Self {
        Self {
            sip: SipInput {
                monthly_investment: 10_000.0,
                duration_years: 10,
                expected_return: 12.0,
            },
            step_up: SipStepUpInput {
                monthly_investment: 10_000.0,
                duration_years: 10,
                expected_return: 12.0,
                annual_increase: 10.0,
            },
            lump_sum: LumpSumInput {
                investment: 100_000.0,
                duration_years: 10,
                expected_return: 12.0,
            },
            swp: SwpInput {
                investment: 1_000_000.0,
                monthly_withdrawal: 10_000.0,
                duration_years: 10,
                expected_return: 12.0,
            },
        }
    }
}

impl CalculatorPresets {
    /// The preset for `kind` as a tagged input.
    #[must_use]
    pub const fn input_for(&self, kind: CalculatorType) -> CalculationInput {
        match kind {
            CalculatorType::Sip => CalculationInput::Sip(self.sip),
            CalculatorType::SipStepUp => CalculationInput::SipStepUp(self.step_up),
            CalculatorType::LumpSum => CalculationInput::LumpSum(self.lump_sum),
            CalculatorType::Swp => CalculationInput::Swp(self.swp),
        }
    }

    /// Checks every preset against the input bounds.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the calculator whose preset is out of bounds.
    pub fn validate(&self) -> Result<()> {
        for kind in CalculatorType::ALL {
            validate(&self.input_for(kind)).map_err(|e| Error::Config {
                message: format!("Preset for {} is invalid: {e}", kind.label()),
            })?;
        }
        Ok(())
    }
}
