use crate::error::{GeneticsError, Result};
use crate::punnett::PunnettSquare;
use crate::statistics::GeneStatistics;
use std::fmt;

/// Critical values of the chi-square distribution for df 1 to 10,
/// at alpha 0.05, 0.01 and 0.001
const CRITICAL_VALUES: [[f64; 3]; 10] = [
    [3.841, 6.635, 10.828],
    [5.991, 9.210, 13.816],
    [7.815, 11.345, 16.266],
    [9.488, 13.277, 18.467],
    [11.070, 15.086, 20.515],
    [12.592, 16.812, 22.458],
    [14.067, 18.475, 24.322],
    [15.507, 20.090, 26.124],
    [16.919, 21.666, 27.877],
    [18.307, 23.209, 29.588],
];

/// p-value of a chi-square statistic, bucketed by the critical value table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PValue {
    BelowOnePerMille,
    BelowOnePercent,
    BelowFivePercent,
    AboveFivePercent,
}

impl fmt::Display for PValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BelowOnePerMille => "p<0.001",
            Self::BelowOnePercent => "p<0.01",
            Self::BelowFivePercent => "p<0.05",
            Self::AboveFivePercent => "p>0.05",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareResult {
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
    pub p_value: PValue,
    /// The observation departs from the expected ratio at alpha 0.05
    pub significant: bool,
}

pub fn critical_values(degrees_of_freedom: usize) -> Result<[f64; 3]> {
    degrees_of_freedom
        .checked_sub(1)
        .and_then(|i| CRITICAL_VALUES.get(i))
        .copied()
        .ok_or(GeneticsError::UnsupportedDegreesOfFreedom(degrees_of_freedom))
}

/// Goodness of fit of observed counts against an expected ratio
///
/// `observed[i]` is compared with the share `expected_ratio[i]` of the total
/// observations. The ratio need not be normalised: `[3.0, 1.0]` is 3:1.
pub fn calculate_chi_square(observed: &[usize], expected_ratio: &[f64]) -> Result<ChiSquareResult> {
    if observed.len() != expected_ratio.len() {
        return Err(GeneticsError::RatioMismatch {
            observed: observed.len(),
            expected: expected_ratio.len(),
        });
    }
    if expected_ratio.iter().any(|r| !r.is_finite() || *r <= 0.0) {
        return Err(GeneticsError::InvalidRatio);
    }
    let total: usize = observed.iter().sum();
    if total == 0 {
        return Err(GeneticsError::EmptySample);
    }

    let degrees_of_freedom = observed.len().saturating_sub(1);
    let [p05, p01, p001] = critical_values(degrees_of_freedom)?;

    let ratio_sum: f64 = expected_ratio.iter().sum();
    let chi_square: f64 = observed
        .iter()
        .zip(expected_ratio)
        .map(|(o, r)| {
            let expected = total as f64 * r / ratio_sum;
            (*o as f64 - expected).powi(2) / expected
        })
        .sum();

    let p_value = if chi_square > p001 {
        PValue::BelowOnePerMille
    } else if chi_square > p01 {
        PValue::BelowOnePercent
    } else if chi_square > p05 {
        PValue::BelowFivePercent
    } else {
        PValue::AboveFivePercent
    };

    Ok(ChiSquareResult {
        chi_square,
        degrees_of_freedom,
        p_value,
        significant: chi_square > p05,
    })
}

/// Tests one gene's phenotype counts against the cross that produced them
///
/// Phenotypes the square does not predict, such as new mutant traits, are
/// left out of the test.
pub fn test_phenotypes(stats: &GeneStatistics, square: &PunnettSquare) -> Result<ChiSquareResult> {
    let expected = square.phenotype_ratio();
    let observed: Vec<usize> = expected
        .iter()
        .map(|(name, _)| stats.phenotype_frequency.get(name).copied().unwrap_or(0))
        .collect();
    let ratio: Vec<f64> = expected.iter().map(|(_, n)| *n as f64).collect();
    calculate_chi_square(&observed, &ratio)
}
