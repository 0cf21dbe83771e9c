//! Clinical calculators: Sokolow-Lyon voltage criterion and corrected QT.
//!
//! The two calculators deliberately differ in strictness. Sokolow-Lyon is a
//! permissive screening tool: absent or unusable inputs count as 0 mm and no
//! error is ever raised. QTc refuses to compute without both intervals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;

/// SV1 + RV5 at or above this many millimeters is positive for LVH.
pub const SOKOLOW_THRESHOLD_MM: f64 = 35.0;

/// QTc below this is short for both sexes.
pub const SHORT_QT_MS: f64 = 350.0;

/// Outcome of one calculator invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorResult<C> {
    /// Unrounded computed value (mm for Sokolow-Lyon, ms for QTc).
    pub numeric_outcome: f64,
    pub classification: C,
    pub display_text: String,
}

impl<C> CalculatorResult<C> {
    /// Outcome rounded to the nearest integer, as displayed.
    pub fn rounded(&self) -> i64 {
        self.numeric_outcome.round() as i64
    }
}

/// Sokolow-Lyon classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LvhVerdict {
    Positive,
    Negative,
}

impl LvhVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            LvhVerdict::Positive => "positive for left ventricular hypertrophy",
            LvhVerdict::Negative => "negative",
        }
    }
}

impl fmt::Display for LvhVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// QTc interpretation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QtcBand {
    Short,
    Normal,
    Borderline,
    Prolonged,
}

impl QtcBand {
    pub fn label(&self) -> &'static str {
        match self {
            QtcBand::Short => "short QT",
            QtcBand::Normal => "normal",
            QtcBand::Borderline => "borderline",
            QtcBand::Prolonged => "prolonged",
        }
    }
}

impl fmt::Display for QtcBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Patient sex, which selects the QTc band edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// `(normal_below, borderline_below)` in ms. At or above the second edge is prolonged.
    pub fn qtc_edges(&self) -> (f64, f64) {
        match self {
            Sex::Male => (450.0, 470.0),
            Sex::Female => (470.0, 480.0),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(format!("unknown sex: {other} (expected male or female)")),
        }
    }
}

/// Parse the longest numeric prefix of raw form text.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Leading whitespace is skipped and trailing garbage
/// ignored, so `"12mm"` is `12`. Returns `None` when no digits lead the
/// text; literals such as `"Infinity"` are not recognized.
pub fn lenient_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts if it has at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

fn coerce_amplitude(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Sokolow-Lyon voltage criterion: SV1 + RV5 ≥ 35 mm suggests LVH.
///
/// Never fails. Absent or non-finite amplitudes count as 0 mm; other values,
/// negative ones included, are summed as given.
pub fn sokolow_lyon(sv1_mm: Option<f64>, rv5_mm: Option<f64>) -> CalculatorResult<LvhVerdict> {
    let total = coerce_amplitude(sv1_mm) + coerce_amplitude(rv5_mm);
    let classification = if total >= SOKOLOW_THRESHOLD_MM {
        LvhVerdict::Positive
    } else {
        LvhVerdict::Negative
    };

    tracing::debug!(total, verdict = %classification, "sokolow-lyon computed");

    CalculatorResult {
        numeric_outcome: total,
        classification,
        display_text: format!("SV1 + RV5 = {total} mm: {classification}"),
    }
}

fn require_positive(value: Option<f64>, field: &'static str) -> Result<f64, CalculatorError> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(CalculatorError::MissingInput { field }),
    }
}

/// Classify an unrounded QTc value.
pub fn classify_qtc(qtc_ms: f64, sex: Sex) -> QtcBand {
    let (normal_below, borderline_below) = sex.qtc_edges();
    if qtc_ms < SHORT_QT_MS {
        QtcBand::Short
    } else if qtc_ms < normal_below {
        QtcBand::Normal
    } else if qtc_ms < borderline_below {
        QtcBand::Borderline
    } else {
        QtcBand::Prolonged
    }
}

/// Bazett's formula: `QT / sqrt(RR in seconds)`.
///
/// Fails with [`CalculatorError::MissingInput`] when either interval is
/// absent or not a positive number. Classification uses the unrounded value;
/// the display text shows it rounded to the nearest millisecond.
pub fn corrected_qt(
    qt_ms: Option<f64>,
    rr_ms: Option<f64>,
    sex: Sex,
) -> Result<CalculatorResult<QtcBand>, CalculatorError> {
    let qt = require_positive(qt_ms, "qt_ms")?;
    let rr = require_positive(rr_ms, "rr_ms")?;

    let qtc = qt / (rr / 1000.0).sqrt();
    let classification = classify_qtc(qtc, sex);

    tracing::debug!(qt, rr, qtc, %sex, band = %classification, "qtc computed");

    Ok(CalculatorResult {
        numeric_outcome: qtc,
        classification,
        display_text: format!("QTc (Bazett): {} ms, {classification}", qtc.round() as i64),
    })
}

/// Fridericia's correction: `QT / cbrt(RR in seconds)`.
///
/// Informational only; it never changes the Bazett band.
pub fn fridericia(qt_ms: f64, rr_ms: f64) -> f64 {
    qt_ms / (rr_ms / 1000.0).cbrt()
}

/// Heart rate implied by an RR interval.
pub fn heart_rate_bpm(rr_ms: f64) -> f64 {
    60_000.0 / rr_ms
}
