//! Rule-based interpretation of a point forecast
//!
//! Thresholds are strict: a median return of exactly `1.0` or `-1.0` is
//! neutral, and a range ratio of exactly `0.04` is low while `0.08` is
//! moderate.

use super::error::InterpretError;
use super::templates::{render_narrative, NarrativeInput, NarrativeStyle};
use crate::models::{Bias, ForecastSummary, InterpretationResult, Uncertainty};

pub const POSITIVE_BIAS_THRESHOLD: f64 = 1.0;
pub const NEGATIVE_BIAS_THRESHOLD: f64 = -1.0;
pub const HIGH_UNCERTAINTY_RATIO: f64 = 0.08;
pub const MODERATE_UNCERTAINTY_RATIO: f64 = 0.04;

pub fn classify_bias(median_return_pct: f64) -> Bias {
    if median_return_pct > POSITIVE_BIAS_THRESHOLD {
        Bias::Positive
    } else if median_return_pct < NEGATIVE_BIAS_THRESHOLD {
        Bias::Negative
    } else {
        Bias::Neutral
    }
}

/// Range width divided by the midpoint of the two bounds
pub fn range_ratio(lower_price: f64, upper_price: f64) -> Result<f64, InterpretError> {
    if !lower_price.is_finite() || !upper_price.is_finite() {
        return Err(InterpretError::invalid(format!(
            "price bounds must be finite (lower={}, upper={})",
            lower_price, upper_price
        )));
    }
    if lower_price < 0.0 {
        return Err(InterpretError::invalid(format!(
            "lower price must not be negative (lower={:.2})",
            lower_price
        )));
    }
    if upper_price < lower_price {
        return Err(InterpretError::invalid(format!(
            "upper price {:.2} is below lower price {:.2}",
            upper_price, lower_price
        )));
    }

    // Halve first so bounds near f64::MAX do not overflow
    let avg_price = lower_price / 2.0 + upper_price / 2.0;
    if avg_price == 0.0 {
        return Err(InterpretError::invalid(
            "average of price bounds is zero; prices must be positive",
        ));
    }

    Ok((upper_price - lower_price) / avg_price)
}

pub fn classify_uncertainty(lower_price: f64, upper_price: f64) -> Result<Uncertainty, InterpretError> {
    let ratio = range_ratio(lower_price, upper_price)?;

    let uncertainty = if ratio > HIGH_UNCERTAINTY_RATIO {
        Uncertainty::High
    } else if ratio > MODERATE_UNCERTAINTY_RATIO {
        Uncertainty::Moderate
    } else {
        Uncertainty::Low
    };

    Ok(uncertainty)
}

pub fn interpret_with_style(
    summary: &ForecastSummary,
    style: NarrativeStyle,
) -> Result<InterpretationResult, InterpretError> {
    let bias = classify_bias(summary.median_return_pct);
    let uncertainty = classify_uncertainty(summary.lower_price, summary.upper_price)?;

    let narrative = render_narrative(
        &NarrativeInput {
            subject_label: &summary.subject_label,
            horizon_label: &summary.horizon_label,
            bias,
            uncertainty,
            median_return_pct: summary.median_return_pct,
            lower_price: summary.lower_price,
            upper_price: summary.upper_price,
        },
        style,
    );

    tracing::debug!(
        subject = %summary.subject_label,
        %bias,
        %uncertainty,
        "Interpreted forecast"
    );

    Ok(InterpretationResult { bias, uncertainty, narrative })
}

pub fn interpret(summary: &ForecastSummary) -> Result<InterpretationResult, InterpretError> {
    interpret_with_style(summary, NarrativeStyle::Markdown)
}

/// Narrative sentence for the summary card
pub fn generate_automated_response(
    stock: &str,
    horizon: &str,
    median_return_pct: f64,
    lower_price: f64,
    upper_price: f64,
) -> Result<String, InterpretError> {
    let summary = ForecastSummary::new(stock, horizon, median_return_pct, lower_price, upper_price);
    interpret(&summary).map(|result| result.narrative)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(median: f64, lower: f64, upper: f64) -> ForecastSummary {
        ForecastSummary::new("Amazon (AMZN)", "next 5 trading days", median, lower, upper)
    }

    #[test]
    fn test_bias_thresholds() {
        assert_eq!(classify_bias(1.5), Bias::Positive);
        assert_eq!(classify_bias(1.0001), Bias::Positive);
        assert_eq!(classify_bias(-2.0), Bias::Negative);
        assert_eq!(classify_bias(-1.0001), Bias::Negative);
        assert_eq!(classify_bias(0.0), Bias::Neutral);
        assert_eq!(classify_bias(0.84), Bias::Neutral);
    }

    #[test]
    fn test_bias_boundaries_are_neutral() {
        assert_eq!(classify_bias(1.0), Bias::Neutral);
        assert_eq!(classify_bias(-1.0), Bias::Neutral);
    }

    #[test]
    fn test_uncertainty_tiers() {
        assert_eq!(classify_uncertainty(90.0, 110.0).unwrap(), Uncertainty::High);
        assert_eq!(classify_uncertainty(97.0, 103.0).unwrap(), Uncertainty::Moderate);
        assert_eq!(classify_uncertainty(100.0, 102.0).unwrap(), Uncertainty::Low);
        assert_eq!(classify_uncertainty(50.0, 50.0).unwrap(), Uncertainty::Low);
    }

    #[test]
    fn test_uncertainty_boundaries_use_strict_comparison() {
        // ratio 8 / 100 and 4 / 100
        assert_eq!(classify_uncertainty(96.0, 104.0).unwrap(), Uncertainty::Moderate);
        assert_eq!(classify_uncertainty(98.0, 102.0).unwrap(), Uncertainty::Low);
    }

    #[test]
    fn test_demo_forecast_is_neutral_moderate() {
        let result = interpret(&summary(0.84, 172.30, 181.90)).unwrap();
        assert_eq!(result.bias, Bias::Neutral);
        assert_eq!(result.uncertainty, Uncertainty::Moderate);
        assert!(result.narrative.contains("**neutral bias**"));
        assert!(result.narrative.contains("**0.84%**"));
        assert!(result.narrative.contains("**172.30**"));
        assert!(result.narrative.contains("**181.90**"));
        assert!(result.narrative.contains("**moderate uncertainty**"));
    }

    #[test]
    fn test_positive_low_scenario() {
        let result = interpret(&summary(1.5, 100.0, 102.0)).unwrap();
        assert_eq!(result.bias, Bias::Positive);
        assert_eq!(result.uncertainty, Uncertainty::Low);
    }

    #[test]
    fn test_negative_high_scenario() {
        let result = interpret(&summary(-2.0, 90.0, 110.0)).unwrap();
        assert_eq!(result.bias, Bias::Negative);
        assert_eq!(result.uncertainty, Uncertainty::High);
        assert!(result.narrative.contains("**-2.00%**"));
    }

    #[test]
    fn test_zero_bounds_rejected() {
        let err = interpret(&summary(0.5, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, InterpretError::InvalidInput(_)));
        assert!(generate_automated_response("X", "next week", 0.5, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_inverted_and_non_finite_bounds_rejected() {
        assert!(classify_uncertainty(110.0, 90.0).is_err());
        assert!(classify_uncertainty(-5.0, 10.0).is_err());
        assert!(classify_uncertainty(f64::NAN, 10.0).is_err());
        assert!(classify_uncertainty(10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_bounds_near_float_max() {
        let ratio = range_ratio(1e308, 1.7e308).unwrap();
        assert!((ratio - 0.7e308 / 1.35e308).abs() < 1e-12);
        assert_eq!(classify_uncertainty(1e308, 1.7e308).unwrap(), Uncertainty::High);
        assert_eq!(classify_uncertainty(f64::MAX, f64::MAX).unwrap(), Uncertainty::Low);
    }

    #[test]
    fn test_interpretation_is_deterministic() {
        let input = summary(0.84, 172.30, 181.90);
        assert_eq!(interpret(&input).unwrap(), interpret(&input).unwrap());
    }

    #[test]
    fn test_generate_automated_response_mentions_labels() {
        let text = generate_automated_response("Amazon (AMZN)", "next 5 trading days", 0.84, 172.30, 181.90)
            .unwrap();
        assert!(text.starts_with("Over the next 5 trading days, Amazon (AMZN) is expected"));
    }

    #[test]
    fn test_plain_style() {
        let result = interpret_with_style(&summary(3.0, 100.0, 120.0), NarrativeStyle::Plain).unwrap();
        assert!(result.narrative.contains("positive bias"));
        assert!(result.narrative.contains("high uncertainty"));
        assert!(!result.narrative.contains('*'));
    }
}
