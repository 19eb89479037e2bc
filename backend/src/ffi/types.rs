//! Type conversion utilities for FFI boundary
//!
//! Converts between Python dicts and the crate's configuration and outcome
//! types.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::cohort::CohortOutcomes;
use crate::config::{presets, CohortConfig, StateLayout, TransitionSpec};
use crate::error::CohortError;
use crate::transitions::EventProbabilities;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field, failing with a ValueError naming the key
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract an optional field; a missing key or `None` gives `None`
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Extract a field, falling back to `default` when missing
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    Ok(extract_optional(dict, key)?.unwrap_or(default))
}

/// Map a crate error onto a Python ValueError
pub fn to_py_err(error: CohortError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert a Python dict to CohortConfig
///
/// ```python
/// {
///     "cohort_id": 1,              # optional
///     "pop_size": 2000,
///     "horizon": 50,
///     "transition": {"type": "Matrix", "layout": "TempStroke", "rows": [...]},
/// }
/// ```
pub fn parse_cohort_config(py_config: &Bound<'_, PyDict>) -> PyResult<CohortConfig> {
    let cohort_id: u64 =
        extract_with_default(py_config, "cohort_id", presets::REFERENCE_COHORT_ID)?;
    let pop_size: usize = extract_required(py_config, "pop_size")?;
    let horizon: usize = extract_required(py_config, "horizon")?;

    let transition_any = py_config
        .get_item("transition")?
        .ok_or_else(|| PyValueError::new_err("Missing required field 'transition'"))?;
    let transition_dict = transition_any.downcast::<PyDict>()?;
    let transition = parse_transition_spec(transition_dict)?;

    let config = CohortConfig {
        cohort_id,
        pop_size,
        horizon,
        transition,
    };
    config.validate().map_err(to_py_err)?;
    Ok(config)
}

fn parse_transition_spec(dict: &Bound<'_, PyDict>) -> PyResult<TransitionSpec> {
    let kind: String = extract_required(dict, "type")?;

    match kind.as_str() {
        "Matrix" => {
            let layout: String = extract_required(dict, "layout")?;
            let layout = match layout.as_str() {
                "Basic" => StateLayout::Basic,
                "TempStroke" => StateLayout::TempStroke,
                other => {
                    return Err(PyValueError::new_err(format!(
                        "Unknown matrix layout '{}' (expected Basic or TempStroke)",
                        other
                    )))
                }
            };
            let rows: Vec<Vec<f64>> = extract_required(dict, "rows")?;
            Ok(TransitionSpec::Matrix { layout, rows })
        }
        "Rules" => Ok(TransitionSpec::Rules(EventProbabilities {
            stroke_probability_while_well: extract_required(dict, "stroke_probability_while_well")?,
            recurrent_stroke_probability: extract_required(dict, "recurrent_stroke_probability")?,
            survival_probability_given_stroke: extract_required(
                dict,
                "survival_probability_given_stroke",
            )?,
            all_cause_death_probability: extract_optional(dict, "all_cause_death_probability")?,
        })),
        other => Err(PyValueError::new_err(format!(
            "Unknown transition type '{}' (expected Matrix or Rules)",
            other
        ))),
    }
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert CohortOutcomes to a Python dict
///
/// `mean_survival_time` is `None` when nobody reached an absorbing state.
pub fn outcomes_to_py(
    py: Python<'_>,
    outcomes: &CohortOutcomes,
    fingerprint: &str,
) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("pop_size", outcomes.pop_size())?;
    dict.set_item("absorbed", outcomes.absorbed())?;
    dict.set_item("alive_at_horizon", outcomes.alive_at_horizon())?;
    dict.set_item("mean_survival_time", outcomes.mean_survival_time().ok())?;
    dict.set_item("total_strokes", outcomes.total_strokes())?;
    dict.set_item("survival_times", PyList::new(py, outcomes.survival_times().iter().copied())?)?;
    dict.set_item("stroke_counts", PyList::new(py, outcomes.stroke_counts().iter().copied())?)?;

    let curve = PyList::new(py, outcomes.survival_curve().breakpoints().iter().copied())?;
    dict.set_item("survival_curve", curve)?;

    let failures = PyList::empty(py);
    for failure in outcomes.failures() {
        let entry = PyDict::new(py);
        entry.set_item("patient_id", failure.patient_id)?;
        entry.set_item("message", failure.error.to_string())?;
        failures.append(entry)?;
    }
    dict.set_item("failures", failures)?;
    dict.set_item("config_fingerprint", fingerprint)?;

    Ok(dict.into())
}
