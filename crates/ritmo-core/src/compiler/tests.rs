use serde_json::{json, Value};

use super::*;
use crate::models::StepDescriptor;
use crate::vocab::SportKind;

fn descriptors(value: Value) -> Vec<StepDescriptor> {
    serde_json::from_value(value).expect("descriptor list deserializes")
}

#[test]
fn compiles_a_minimal_time_step() {
    let steps = descriptors(json!([
        {"description": "Planxa", "durationType": "time", "durationValue": 30}
    ]));
    let compiled = compile(&steps).expect("compiles");
    assert_eq!(compiled.len(), 1);

    let CanonicalStep::Executable(step) = &compiled[0] else {
        panic!("expected executable step");
    };
    assert_eq!(step.step_order, 1);
    assert_eq!(step.description, "Planxa");
    assert_eq!(step.end_condition.condition_type_key, "time");
    assert_eq!(step.end_condition_value, Some(30.0));
    assert_eq!(step.step_type.step_type_key, "interval");
    assert_eq!(step.target_type.workout_target_type_key, "no.target");
}

#[test]
fn numeric_strings_are_accepted() {
    let steps = descriptors(json!([
        {"description": "Squats", "durationType": "reps", "durationValue": "12"}
    ]));
    let compiled = compile(&steps).expect("compiles");
    let CanonicalStep::Executable(step) = &compiled[0] else {
        panic!("expected executable step");
    };
    assert_eq!(step.end_condition_value, Some(12.0));
    assert_eq!(step.end_condition.condition_type_key, "iterations");
}

#[test]
fn rest_keyword_infers_rest_step_type() {
    let steps = descriptors(json!([
        {"description": "Descans actiu", "durationType": "time", "durationValue": 60},
        {"description": "Rest between sets", "durationType": "time", "durationValue": 45},
        {"description": "Sprint", "durationType": "time", "durationValue": 20}
    ]));
    let compiled = compile(&steps).expect("compiles");
    let keys: Vec<&str> = compiled
        .iter()
        .map(|step| match step {
            CanonicalStep::Executable(s) => s.step_type.step_type_key,
            CanonicalStep::Repeat(_) => "repeat",
        })
        .collect();
    assert_eq!(keys, ["rest", "rest", "interval"]);
}

#[test]
fn explicit_step_type_wins_over_inference() {
    let steps = descriptors(json!([
        {"description": "Descans llarg", "durationType": "time", "durationValue": 120,
         "stepType": "recovery"}
    ]));
    let compiled = compile(&steps).expect("compiles");
    let CanonicalStep::Executable(step) = &compiled[0] else {
        panic!("expected executable step");
    };
    assert_eq!(step.step_type.step_type_key, "recovery");
}

#[test]
fn unknown_duration_type_cites_exact_path() {
    let steps = descriptors(json!([
        {"description": "Ok", "durationType": "time", "durationValue": 30},
        {"description": "Ok", "durationType": "time", "durationValue": 30},
        {"description": "Bad", "durationType": "minutes", "durationValue": 5}
    ]));
    let err = compile(&steps).unwrap_err();
    match err {
        crate::WorkoutError::Validation { path, reason } => {
            assert_eq!(path, "steps[2].durationType");
            assert!(reason.contains("time"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn nested_invalid_child_cites_nested_path() {
    let steps = descriptors(json!([
        {"type": "repeat_group", "iterations": 3, "steps": [
            {"description": "Squats", "durationType": "reps", "durationValue": 0}
        ]}
    ]));
    let err = compile(&steps).unwrap_err();
    match err {
        crate::WorkoutError::Validation { path, .. } => {
            assert_eq!(path, "steps[0].steps[0].durationValue");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_description_is_rejected() {
    let steps = descriptors(json!([
        {"description": "   ", "durationType": "time", "durationValue": 30}
    ]));
    let err = compile(&steps).unwrap_err();
    match err {
        crate::WorkoutError::Validation { path, .. } => {
            assert_eq!(path, "steps[0].description");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn lap_button_steps_carry_no_value() {
    let steps = descriptors(json!([
        {"description": "Serie oberta", "durationType": "lap_button", "durationValue": 999}
    ]));
    let compiled = compile(&steps).expect("compiles");
    let CanonicalStep::Executable(step) = &compiled[0] else {
        panic!("expected executable step");
    };
    assert_eq!(step.end_condition_value, None);
    assert_eq!(step.end_condition.condition_type_key, "iterations");
    assert_eq!(step.end_condition.display_order, 7);
}

#[test]
fn repeat_group_is_inferred_from_iterations_and_children() {
    let steps = descriptors(json!([
        {"iterations": 4, "steps": [
            {"description": "Burpees", "durationType": "reps", "durationValue": 10}
        ]}
    ]));
    let compiled = compile(&steps).expect("compiles");
    let CanonicalStep::Repeat(group) = &compiled[0] else {
        panic!("expected repeat group");
    };
    assert_eq!(group.number_of_iterations, 4);
    assert_eq!(group.workout_steps.len(), 1);
    assert_eq!(group.end_condition_value, 4.0);
    assert!(!group.end_condition.displayable);
    assert!(!group.smart_repeat);
}

#[test]
fn legacy_iteration_field_names_are_accepted() {
    let steps = descriptors(json!([
        {"type": "repeat", "numberOfIterations": 2, "workoutSteps": [
            {"description": "Planxa", "durationType": "time", "durationValue": 30}
        ]}
    ]));
    let compiled = compile(&steps).expect("compiles");
    let CanonicalStep::Repeat(group) = &compiled[0] else {
        panic!("expected repeat group");
    };
    assert_eq!(group.number_of_iterations, 2);
}

#[test]
fn repeat_group_requires_children() {
    let steps = descriptors(json!([
        {"type": "repeat_group", "iterations": 3}
    ]));
    let err = compile(&steps).unwrap_err();
    match err {
        crate::WorkoutError::Validation { path, .. } => {
            assert_eq!(path, "steps[0].steps");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn sibling_orders_default_to_position_independently_per_level() {
    let steps = descriptors(json!([
        {"description": "Escalfament", "durationType": "time", "durationValue": 300},
        {"type": "repeat_group", "iterations": 2, "steps": [
            {"description": "Squats", "durationType": "reps", "durationValue": 12},
            {"description": "Planxa", "durationType": "time", "durationValue": 30}
        ]}
    ]));
    let compiled = compile(&steps).expect("compiles");
    assert_eq!(compiled[0].step_order(), 1);
    assert_eq!(compiled[1].step_order(), 2);

    let CanonicalStep::Repeat(group) = &compiled[1] else {
        panic!("expected repeat group");
    };
    assert_eq!(group.workout_steps[0].step_order(), 1);
    assert_eq!(group.workout_steps[1].step_order(), 2);
}

#[test]
fn explicit_step_order_must_be_positive() {
    let steps = descriptors(json!([
        {"description": "Planxa", "durationType": "time", "durationValue": 30, "stepOrder": 0}
    ]));
    assert!(compile(&steps).is_err());
}

#[test]
fn compile_is_idempotent_on_canonical_output() {
    let original = descriptors(json!([
        {"description": "Escalfament", "durationType": "time", "durationValue": 300,
         "stepType": "warmup"},
        {"type": "repeat_group", "iterations": 3, "smartRepeat": true, "steps": [
            {"description": "Squats", "durationType": "reps", "durationValue": 12},
            {"description": "Serie oberta", "durationType": "open"}
        ]}
    ]));
    let compiled = compile(&original).expect("compiles");

    let round_tripped: Vec<StepDescriptor> =
        serde_json::from_value(serde_json::to_value(&compiled).unwrap())
            .expect("canonical output deserializes as descriptors");
    let recompiled = compile(&round_tripped).expect("recompiles");

    assert_eq!(compiled, recompiled);
}

#[test]
fn duration_estimation_for_time_and_reps() {
    let steps = descriptors(json!([
        {"description": "Planxa", "durationType": "time", "durationValue": 30},
        {"description": "Squats", "durationType": "reps", "durationValue": 10},
        {"description": "Lunges (per cama)", "durationType": "reps", "durationValue": 10},
        {"description": "Serie oberta", "durationType": "lap_button"},
        {"description": "Cursa", "durationType": "distance", "durationValue": 1000}
    ]));
    let compiled = compile(&steps).expect("compiles");
    let estimates: Vec<f64> = compiled.iter().map(estimate_step_seconds).collect();
    assert_eq!(estimates[0], 30.0);
    assert_eq!(estimates[1], 10.0 * REPS_TO_SECONDS_FACTOR);
    assert_eq!(estimates[2], 10.0 * 2.0 * REPS_TO_SECONDS_FACTOR);
    assert_eq!(estimates[3], OPEN_STEP_DEFAULT_SECONDS);
    assert_eq!(estimates[4], 0.0);
}

#[test]
fn repeat_group_estimate_is_child_sum_times_iterations() {
    let steps = descriptors(json!([
        {"type": "repeat_group", "iterations": 3, "steps": [
            {"description": "Squats", "durationType": "reps", "durationValue": 10},
            {"description": "Planxa", "durationType": "time", "durationValue": 30}
        ]}
    ]));
    let compiled = compile(&steps).expect("compiles");
    let per_iteration = 10.0 * REPS_TO_SECONDS_FACTOR + 30.0;
    assert_eq!(estimate_step_seconds(&compiled[0]), per_iteration * 3.0);
}

#[test]
fn payload_estimates_from_steps() {
    let steps = descriptors(json!([
        {"description": "Planxa", "durationType": "time", "durationValue": 90}
    ]));
    let plan = build_workout_payload("Core", "Sessio de core", SportKind::Strength, 45, Some(&steps))
        .expect("builds");
    assert_eq!(plan.estimated_duration_in_secs, 90);
    assert_eq!(plan.workout_segments.len(), 1);
    assert_eq!(plan.workout_segments[0].segment_order, 1);
    assert_eq!(plan.sport_type.sport_type_key, "strength_training");
}

#[test]
fn payload_falls_back_to_requested_duration_for_open_plans() {
    let steps = descriptors(json!([
        {"description": "Serie oberta", "durationType": "lap_button", "stepType": "interval"}
    ]));
    // One open step estimates to 90s, so force a zero estimate via distance.
    let zero_steps = descriptors(json!([
        {"description": "Cursa", "durationType": "distance", "durationValue": 5000}
    ]));
    let plan =
        build_workout_payload("Cursa", "Rodatge", SportKind::Running, 40, Some(&zero_steps))
            .expect("builds");
    assert_eq!(plan.estimated_duration_in_secs, 40 * 60);

    let open_plan =
        build_workout_payload("Obert", "Series", SportKind::Cardio, 40, Some(&steps))
            .expect("builds");
    assert_eq!(open_plan.estimated_duration_in_secs, 90);
}

#[test]
fn default_plan_covers_requested_duration() {
    let plan = build_workout_payload("Generic", "Sessio", SportKind::Cardio, 45, None)
        .expect("builds");
    assert_eq!(plan.estimated_duration_in_secs, 45 * 60);

    let steps = &plan.workout_segments[0].workout_steps;
    assert_eq!(steps.len(), 3);
    let seconds: f64 = steps.iter().map(estimate_step_seconds).sum();
    assert_eq!(seconds, (45 * 60) as f64);
}

#[test]
fn short_default_plan_shrinks_bookends() {
    let plan = build_workout_payload("Curt", "Sessio curta", SportKind::Cardio, 10, None)
        .expect("builds");
    let steps = &plan.workout_segments[0].workout_steps;
    let CanonicalStep::Executable(warmup) = &steps[0] else {
        panic!("expected executable step");
    };
    assert_eq!(warmup.end_condition_value, Some(120.0));
}

#[test]
fn duration_is_clamped_into_bounds() {
    let plan = build_workout_payload("Llarg", "Sessio", SportKind::Cardio, 9999, None)
        .expect("builds");
    assert_eq!(plan.estimated_duration_in_secs, 480 * 60);
}

#[test]
fn shorthand_rounds_compile_end_to_end() {
    let steps = descriptors(json!([
        {"description": "RONDA 1: 12 Squats, 30s Planxa"},
        {"description": "Descans entre rondes", "durationType": "time", "durationValue": 60},
        {"description": "RONDA 2: 12 Squats, 30s Planxa"},
        {"description": "Descans entre rondes", "durationType": "time", "durationValue": 60},
        {"description": "RONDA 3: 12 Squats, 30s Planxa"}
    ]));
    let plan = build_workout_payload("Circuit", "Circuit de cames", SportKind::Strength, 45, Some(&steps))
        .expect("builds");

    let top = &plan.workout_segments[0].workout_steps;
    assert_eq!(top.len(), 1);
    let CanonicalStep::Repeat(group) = &top[0] else {
        panic!("expected repeat group");
    };
    assert_eq!(group.number_of_iterations, 3);
    assert_eq!(group.workout_steps.len(), 3);

    let CanonicalStep::Executable(squats) = &group.workout_steps[0] else {
        panic!("expected executable step");
    };
    assert_eq!(squats.description, "Squats");
    assert_eq!(squats.end_condition.condition_type_key, "iterations");
    assert_eq!(squats.end_condition_value, Some(12.0));

    let CanonicalStep::Executable(planxa) = &group.workout_steps[1] else {
        panic!("expected executable step");
    };
    assert_eq!(planxa.end_condition.condition_type_key, "time");
    assert_eq!(planxa.end_condition_value, Some(30.0));

    let CanonicalStep::Executable(rest) = &group.workout_steps[2] else {
        panic!("expected executable step");
    };
    assert_eq!(rest.step_type.step_type_key, "rest");
    assert_eq!(rest.end_condition_value, Some(60.0));

    // (12 reps * 3s + 30s + 60s) * 3 rounds
    assert_eq!(plan.estimated_duration_in_secs, 378);
}

#[test]
fn sanitize_for_upload_strips_server_fields() {
    let detail = json!({
        "workoutId": 42, "ownerId": 7, "createdDate": "x", "updateDate": "y",
        "author": {}, "consumer": {}, "workoutName": "Kept"
    });
    let sanitized = sanitize_for_upload(&detail);
    assert_eq!(sanitized, json!({"workoutName": "Kept"}));

    let updated = sanitize_for_update(&detail);
    assert_eq!(updated, json!({"workoutId": 42, "ownerId": 7, "workoutName": "Kept"}));
}

#[test]
fn apply_sport_rewrites_segments() {
    let mut payload = json!({
        "sportType": {"sportTypeKey": "hiit"},
        "workoutSegments": [
            {"segmentOrder": 1, "sportType": {"sportTypeKey": "hiit"}}
        ]
    });
    apply_sport(&mut payload, SportKind::Cardio);
    assert_eq!(payload["sportType"]["sportTypeKey"], "cardio_training");
    assert_eq!(
        payload["workoutSegments"][0]["sportType"]["sportTypeKey"],
        "cardio_training"
    );
}
