//! Signal input: a JSON document holding one signal or a list of signals.
//!
//! A signal is either an array of numbers or an object `{"x": [...], "y": [...]}`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use dwtviz_gp::Observations;
use dwtviz_heatmap::Signal;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignalJson {
    Values(Vec<f64>),
    Coords { x: Vec<f64>, y: Vec<f64> },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputJson {
    Many(Vec<SignalJson>),
    One(SignalJson),
}

fn parse(text: &str) -> Result<Vec<SignalJson>> {
    let input: InputJson = serde_json::from_str(text)
        .context("expected a signal or a list of signals (number arrays or {\"x\", \"y\"} objects)")?;
    Ok(match input {
        InputJson::One(s) => vec![s],
        // a bare `[]` is one signal without samples
        InputJson::Many(list) if list.is_empty() => vec![SignalJson::Values(Vec::new())],
        InputJson::Many(list) => list,
    })
}

fn read(path: &Path) -> Result<Vec<SignalJson>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse signals: {}", path.display()))
}

fn to_signals(parsed: Vec<SignalJson>) -> Result<Vec<Signal>> {
    parsed
        .into_iter()
        .enumerate()
        .map(|(i, s)| match s {
            SignalJson::Values(values) => Ok(Signal::new(values)),
            SignalJson::Coords { x, y } => {
                Signal::with_coords(x, y).with_context(|| format!("signal {i}"))
            }
        })
        .collect()
}

fn to_observations(parsed: Vec<SignalJson>) -> Result<Vec<Observations>> {
    parsed
        .into_iter()
        .enumerate()
        .map(|(i, s)| match s {
            SignalJson::Coords { x, y } => {
                Observations::new(x, y).with_context(|| format!("signal {i}"))
            }
            SignalJson::Values(_) => bail!("signal {i} has no x coordinates"),
        })
        .collect()
}

/// Reads signals for plain rendering.
pub fn read_signals(path: &Path) -> Result<Vec<Signal>> {
    to_signals(read(path)?)
}

/// Reads irregularly sampled signals for smoothing; every signal needs x.
pub fn read_observations(path: &Path) -> Result<Vec<Observations>> {
    to_observations(read(path)?)
}
