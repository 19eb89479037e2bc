//! Python entry points
//!
//! ```python
//! from markov_cohort_core_rs import run_cohort
//!
//! result = run_cohort({
//!     "pop_size": 2000,
//!     "horizon": 50,
//!     "transition": {
//!         "type": "Rules",
//!         "stroke_probability_while_well": 0.035,
//!         "recurrent_stroke_probability": 0.2,
//!         "survival_probability_given_stroke": 0.7,
//!     },
//! })
//! print(result["mean_survival_time"], result["survival_curve"][:5])
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{outcomes_to_py, parse_cohort_config, to_py_err};

/// Build and simulate a cohort from a config dict
///
/// # Errors
///
/// Raises ValueError if the configuration is missing fields or fails
/// validation (bad matrix, probability outside [0, 1], zero population).
#[pyfunction]
pub fn run_cohort(py: Python<'_>, config: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
    let config = parse_cohort_config(config)?;
    let fingerprint = config.fingerprint().map_err(to_py_err)?;
    let outcomes = config.run().map_err(to_py_err)?;
    outcomes_to_py(py, &outcomes, &fingerprint)
}

/// SHA-256 fingerprint of a config dict, as stamped on `run_cohort` results
#[pyfunction]
pub fn config_fingerprint(config: &Bound<'_, PyDict>) -> PyResult<String> {
    let config = parse_cohort_config(config)?;
    config.fingerprint().map_err(to_py_err)
}
