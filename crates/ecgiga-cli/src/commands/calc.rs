//! The `ecgiga sokolow` and `ecgiga qtc` commands.
//!
//! Inputs arrive as raw text and go through the same lenient number parsing
//! a form field would, so `--sv1 12mm` reads as 12.

use anyhow::Result;
use serde::Serialize;

use ecgiga_core::calculator::{fridericia, heart_rate_bpm, lenient_number};
use ecgiga_core::{corrected_qt, sokolow_lyon, CalculatorResult, QtcBand, Sex};

use crate::config::EcgigaConfig;

pub fn sokolow(sv1: Option<&str>, rv5: Option<&str>, format: &str) -> Result<()> {
    super::check_format(format)?;
    let result = sokolow_lyon(sv1.and_then(lenient_number), rv5.and_then(lenient_number));

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.display_text);
    }
    Ok(())
}

#[derive(Serialize)]
struct QtcReport {
    #[serde(flatten)]
    bazett: CalculatorResult<QtcBand>,
    sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    fridericia_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heart_rate_bpm: Option<f64>,
}

pub fn qtc(
    config: &EcgigaConfig,
    qt: Option<&str>,
    rr: Option<&str>,
    sex: Option<Sex>,
    format: &str,
) -> Result<()> {
    super::check_format(format)?;
    let sex = sex.unwrap_or(config.default_sex);
    let qt_ms = qt.and_then(lenient_number);
    let rr_ms = rr.and_then(lenient_number);
    let bazett = corrected_qt(qt_ms, rr_ms, sex)?;

    // Both are known positive once Bazett succeeded.
    let extras = match (config.show_fridericia, qt_ms, rr_ms) {
        (true, Some(qt), Some(rr)) => Some((fridericia(qt, rr), heart_rate_bpm(rr))),
        _ => None,
    };

    let report = QtcReport {
        bazett,
        sex,
        fridericia_ms: extras.map(|(f, _)| f),
        heart_rate_bpm: extras.map(|(_, hr)| hr),
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.bazett.display_text);
    if let Some((fridericia_ms, bpm)) = extras {
        println!("QTc (Fridericia): {} ms", fridericia_ms.round() as i64);
        println!("Heart rate: {} bpm", bpm.round() as i64);
    }
    Ok(())
}
