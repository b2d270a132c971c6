use approx::assert_abs_diff_eq;
use infant_model::{
    ArtifactLoader, LogisticModel, ModelError, ModelHandle, ModelRow, RiskModel, WealthIndex,
};
use serde_json::json;
use std::fs;

fn artifact(intercept: f64) -> serde_json::Value {
    json!({
        "name": "child-recode",
        "intercept": intercept,
        "coefficients": {
            "v170 - has an account in a bank or other financial institution": 0.0,
            "v136 - number of household members (listed)": 0.0,
            "bord - birth order number": 0.0,
            "m14 - number of antenatal visits during pregnancy": 0.0,
            "v190 - wealth index combined": 0.0
        },
        "wealth_levels": ["Poorest", "Poorer", "Middle", "Richer", "Richest"]
    })
}

fn row() -> ModelRow {
    ModelRow::builder()
        .bank_account(false)
        .household_members(5)
        .birth_order(1)
        .antenatal_visits(4)
        .wealth_index(WealthIndex::Poorest)
        .build()
        .expect("row")
}

#[test]
fn load_model_from_json_file() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("child_recode_model.json");
    fs::write(&path, artifact(0.0).to_string()).expect("write");

    let model = LogisticModel::load(&path).expect("load");
    assert_eq!(model.name(), "child-recode");
    assert_abs_diff_eq!(model.decision_threshold, 0.5, epsilon = 1e-12);
    let [_, p1] = model.predict_proba(&row()).expect("proba");
    assert_abs_diff_eq!(p1, 0.5, epsilon = 1e-12);
}

#[test]
fn missing_artifact_is_io_error() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let err = LogisticModel::load(tmp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ModelError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn schema_mismatch_fails_at_load() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("model.json");
    let mut doc = artifact(0.0);
    doc["coefficients"]
        .as_object_mut()
        .expect("object")
        .remove("bord - birth order number");
    fs::write(&path, doc.to_string()).expect("write");

    let err = ModelHandle::open(ArtifactLoader::new(&path)).unwrap_err();
    assert!(matches!(err, ModelError::SchemaMismatch(_)));
}

#[test]
fn unknown_wealth_label_is_rejected() {
    let mut doc = artifact(0.0);
    doc["wealth_levels"] = json!(["Poorest", "Poorer", "Middle", "Richer", "Wealthy"]);
    let err = LogisticModel::from_json_str(&doc.to_string()).unwrap_err();
    assert!(matches!(err, ModelError::Serialization(_)));
}

#[test]
fn refresh_picks_up_rewritten_artifact() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("model.json");
    fs::write(&path, artifact(-2.0).to_string()).expect("write");

    let mut handle = ModelHandle::open(ArtifactLoader::new(&path)).expect("open");
    let [_, before] = handle.model().predict_proba(&row()).expect("proba");

    fs::write(&path, artifact(2.0).to_string()).expect("rewrite");
    handle.refresh().expect("refresh");
    let [_, after] = handle.model().predict_proba(&row()).expect("proba");

    assert_eq!(handle.generation(), 2);
    assert!(before < 0.5 && after > 0.5);

    fs::write(&path, "{ not json").expect("corrupt");
    assert!(handle.refresh().is_err());
    let [_, kept] = handle.model().predict_proba(&row()).expect("proba");
    assert_abs_diff_eq!(kept, after, epsilon = 1e-12);
}
