//! Tests for JSON configuration and config-driven runs

use markov_cohort_core_rs::config::presets;
use markov_cohort_core_rs::{
    Cohort, CohortConfig, CohortError, EventProbabilities, MatrixModel, RuleBasedModel,
    StateLayout, TempStrokeState, TransitionSpec,
};

const MATRIX_JSON: &str = r#"{
    "cohort_id": 1,
    "pop_size": 400,
    "horizon": 50,
    "transition": {
        "type": "Matrix",
        "layout": "TempStroke",
        "rows": [[0.95, 0.035, 0.0, 0.015],
                 [0.0, 0.0, 0.7, 0.3],
                 [0.0, 0.2, 0.8, 0.0],
                 [0.0, 0.0, 0.0, 1.0]]
    }
}"#;

const RULES_JSON: &str = r#"{
    "cohort_id": 3,
    "pop_size": 250,
    "horizon": 40,
    "transition": {
        "type": "Rules",
        "stroke_probability_while_well": 0.035,
        "recurrent_stroke_probability": 0.2,
        "survival_probability_given_stroke": 0.7
    }
}"#;

#[test]
fn test_parse_matrix_config() {
    let config = CohortConfig::from_json_str(MATRIX_JSON).unwrap();
    assert_eq!(config.pop_size, 400);
    assert_eq!(
        config.transition,
        TransitionSpec::Matrix {
            layout: StateLayout::TempStroke,
            rows: presets::trans_matrix_stroke(),
        }
    );
}

#[test]
fn test_parse_rules_config_without_all_cause() {
    let config = CohortConfig::from_json_str(RULES_JSON).unwrap();
    match config.transition {
        TransitionSpec::Rules(probabilities) => {
            assert_eq!(probabilities.all_cause_death_probability, None);
            assert_eq!(probabilities.recurrent_stroke_probability, 0.2);
        }
        other => panic!("expected rules, got {:?}", other),
    }
}

#[test]
fn test_config_run_matches_typed_api() {
    let config = CohortConfig::from_json_str(MATRIX_JSON).unwrap();
    let from_config = config.run().unwrap();

    let model = MatrixModel::<TempStrokeState>::new(presets::trans_matrix_stroke()).unwrap();
    let typed = Cohort::new(1, 400, 50, model).unwrap().simulate();

    assert_eq!(from_config, typed);
}

#[test]
fn test_rules_config_run_matches_typed_api() {
    let config = CohortConfig::from_json_str(RULES_JSON).unwrap();
    let from_config = config.run().unwrap();

    let model = RuleBasedModel::new(EventProbabilities {
        stroke_probability_while_well: 0.035,
        recurrent_stroke_probability: 0.2,
        survival_probability_given_stroke: 0.7,
        all_cause_death_probability: None,
    })
    .unwrap();
    let typed = Cohort::new(3, 250, 40, model).unwrap().simulate();

    assert_eq!(from_config, typed);
}

#[test]
fn test_bad_matrix_aborts_before_simulation() {
    let mut config = CohortConfig::basic_preset();
    config.transition = TransitionSpec::Matrix {
        layout: StateLayout::Basic,
        rows: vec![vec![0.9, 0.2, -0.1], vec![0.8, 0.14, 0.06], vec![0.0, 0.0, 1.0]],
    };

    assert!(matches!(config.validate(), Err(CohortError::InvalidDistribution { .. })));
    assert!(matches!(config.run(), Err(CohortError::InvalidDistribution { .. })));
}

#[test]
fn test_layout_dimension_mismatch() {
    let mut config = CohortConfig::temp_stroke_preset();
    config.transition = TransitionSpec::Matrix {
        layout: StateLayout::TempStroke,
        rows: presets::trans_matrix(),
    };
    assert!(matches!(config.run(), Err(CohortError::InvalidConfig(_))));
}

#[test]
fn test_zero_horizon_rejected() {
    let mut config = CohortConfig::basic_preset();
    config.horizon = 0;
    assert!(matches!(config.validate(), Err(CohortError::InvalidConfig(_))));
    assert!(matches!(config.run(), Err(CohortError::InvalidConfig(_))));
}

#[test]
fn test_missing_field_is_invalid_config() {
    let err = CohortConfig::from_json_str(r#"{"pop_size": 10}"#).unwrap_err();
    assert!(matches!(err, CohortError::InvalidConfig(_)));
}

#[test]
fn test_missing_file_is_invalid_config() {
    let err = CohortConfig::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("cannot read"));
}

#[test]
fn test_json_round_trip_keeps_fingerprint() {
    let config = CohortConfig::from_json_str(RULES_JSON).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let reparsed = CohortConfig::from_json_str(&json).unwrap();

    assert_eq!(config, reparsed);
    assert_eq!(config.fingerprint().unwrap(), reparsed.fingerprint().unwrap());
}

#[test]
fn test_summary_reports_outcomes() {
    let config = CohortConfig::from_json_str(MATRIX_JSON).unwrap();
    let outcomes = config.run().unwrap();
    let summary = config.summarize().unwrap();

    assert_eq!(summary.pop_size, 400);
    assert_eq!(summary.absorbed, outcomes.absorbed());
    assert_eq!(summary.alive_at_horizon, outcomes.alive_at_horizon());
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.mean_survival_time, outcomes.mean_survival_time().ok());
    assert_eq!(summary.total_strokes, outcomes.total_strokes());
    assert_eq!(summary.survival_curve[0], (0.0, 400));
    assert_eq!(summary.survival_times, outcomes.survival_times());
    assert_eq!(summary.stroke_counts, outcomes.stroke_counts());
    assert_eq!(summary.stroke_counts.len(), 400);
    assert_eq!(summary.config_fingerprint, Some(config.fingerprint().unwrap()));

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["survival_times"].is_array());
    assert!(json["stroke_counts"].is_array());
}

#[test]
fn test_summary_mean_is_null_when_nobody_dies() {
    let config = CohortConfig {
        cohort_id: 1,
        pop_size: 5,
        horizon: 10,
        transition: TransitionSpec::Matrix {
            layout: StateLayout::Basic,
            rows: vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]],
        },
    };

    let summary = config.summarize().unwrap();
    assert_eq!(summary.mean_survival_time, None);

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["mean_survival_time"].is_null());
}
