//! Reference input data
//!
//! Annual transition probabilities for the stroke model and the default
//! simulation settings.

/// Cohort population size
pub const POP_SIZE: usize = 2000;

/// Simulation length in annual cycles
pub const SIM_TIME_STEPS: usize = 50;

/// Cohort id used by the reference run
pub const REFERENCE_COHORT_ID: u64 = 1;

/// Three-state matrix over Well, PostStroke, Dead
pub fn trans_matrix() -> Vec<Vec<f64>> {
    vec![
        vec![0.95, 0.035, 0.015], // Well
        vec![0.8, 0.14, 0.06],    // PostStroke
        vec![0.0, 0.0, 1.0],      // Dead
    ]
}

/// Four-state matrix over Well, Stroke, PostStroke, Dead
pub fn trans_matrix_stroke() -> Vec<Vec<f64>> {
    vec![
        vec![0.95, 0.035, 0.0, 0.015], // Well
        vec![0.0, 0.0, 0.7, 0.3],      // Stroke
        vec![0.0, 0.2, 0.8, 0.0],      // PostStroke
        vec![0.0, 0.0, 0.0, 1.0],      // Dead
    ]
}
