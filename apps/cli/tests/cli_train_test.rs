//! Integration tests for the `trainbench` binary.

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use tempfile::TempDir;

const UNREACHABLE: &str = "http://127.0.0.1:1";

const KMEANS_REPORT: &str = r#"{
    "status": "ok",
    "problem_type": "clustering",
    "target_column": null,
    "model_name": "KMeans",
    "hyperparameters_used": {"n_clusters": "5"},
    "metrics": {"inertia": 12.34, "labels": [0, 1, 1]},
    "hf_status": "uploaded",
    "hf_filename": "KMeans_abc123.pkl",
    "huggingface_download_url": "https://huggingface.co/datasets/org/models/resolve/main/KMeans_abc123.pkl",
    "model_path": "models/x.pkl"
}"#;

/// A command isolated from the developer's config, session and environment.
fn trainbench(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trainbench").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("TRAINBENCH_SESSION_ID")
        .env_remove("TRAINBENCH_BACKEND_URL");
    cmd
}

fn write_session_file(home: &TempDir, id: &str) {
    let dir = home.path().join(".trainbench");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("session"), format!("{id}\n")).unwrap();
}

#[test]
fn test_models_lists_all_choices() {
    let home = TempDir::new().unwrap();
    trainbench(&home)
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Models (5)"))
        .stdout(predicate::str::contains("RandomForestClassifier"))
        .stdout(predicate::str::contains("KMeans"));
}

#[test]
fn test_models_json() {
    let home = TempDir::new().unwrap();
    let output = trainbench(&home).args(["models", "--json"]).output().unwrap();
    assert!(output.status.success());

    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        names,
        vec!["RandomForestClassifier", "LogisticRegression", "RandomForestRegressor", "LinearRegression", "KMeans"]
    );
}

#[test]
fn test_hyperparams_rejects_unknown_model() {
    let home = TempDir::new().unwrap();
    trainbench(&home)
        .args(["hyperparams", "SVC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown model"));
}

#[test]
fn test_hyperparams_service_down_prints_empty_set() {
    let home = TempDir::new().unwrap();
    trainbench(&home)
        .args(["--backend-url", UNREACHABLE, "hyperparams", "KMeans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No default hyperparameters available."));
}

#[test]
fn test_hyperparams_json_keeps_service_order() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/hyperparameters")
        .match_query(Matcher::UrlEncoded("model_name".into(), "LogisticRegression".into()))
        .with_status(200)
        .with_body(r#"{"default_hyperparameters": {"max_iter": 100, "C": 1.0}}"#)
        .create();

    let output = trainbench(&home)
        .args(["--backend-url", &server.url(), "hyperparams", "LogisticRegression", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let max_iter = stdout.find("max_iter").unwrap();
    let c = stdout.find("\"C\"").unwrap();
    assert!(max_iter < c);
}

#[test]
fn test_train_without_session() {
    let home = TempDir::new().unwrap();
    trainbench(&home)
        .args(["--backend-url", UNREACHABLE, "train", "--model", "KMeans"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active session. Please clean and save your dataset first."));
}

#[test]
fn test_train_without_model() {
    let home = TempDir::new().unwrap();
    trainbench(&home)
        .args(["--backend-url", UNREACHABLE, "train", "--session", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select a model first!"));
}

#[test]
fn test_train_session_from_env() {
    let home = TempDir::new().unwrap();
    trainbench(&home)
        .env("TRAINBENCH_SESSION_ID", "abc123")
        .args(["--backend-url", UNREACHABLE, "train"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select a model first!"));
}

#[test]
fn test_train_service_down_reports_generic_failure() {
    let home = TempDir::new().unwrap();
    trainbench(&home)
        .args(["--backend-url", UNREACHABLE, "train", "--session", "abc123", "--model", "KMeans"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Training failed"))
        .stderr(predicate::str::contains("No default hyperparameters loaded; training with an empty set"));
}

#[test]
fn test_train_prints_full_report() {
    let home = TempDir::new().unwrap();
    write_session_file(&home, "abc123");

    let mut server = mockito::Server::new();
    let _defaults = server
        .mock("GET", "/hyperparameters")
        .match_query(Matcher::UrlEncoded("model_name".into(), "KMeans".into()))
        .with_status(200)
        .with_body(r#"{"default_hyperparameters": {"n_clusters": 3}}"#)
        .create();
    let train = server
        .mock("POST", "/train-model")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="session_id"\r\n\r\nabc123\r\n"#.to_string()),
            Matcher::Regex(r#"name="model_choice"\r\n\r\nKMeans\r\n"#.to_string()),
            Matcher::Regex(r#"name="params"\r\n\r\n\{"n_clusters":"5"\}\r\n"#.to_string()),
        ]))
        .with_status(200)
        .with_body(KMEANS_REPORT)
        .create();

    trainbench(&home)
        .args(["--backend-url", &server.url(), "train", "--model", "KMeans", "--param", "n_clusters=5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model: KMeans"))
        .stdout(predicate::str::contains("Problem Type: clustering"))
        .stdout(predicate::str::contains("\"inertia\": 12.34"))
        .stdout(predicate::str::contains("\"labels\""))
        .stdout(predicate::str::contains("KMeans_abc123.pkl"));

    train.assert();
}

#[test]
fn test_train_surfaces_service_detail() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _defaults = server
        .mock("GET", "/hyperparameters")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"default_hyperparameters": {}}"#)
        .create();
    let _train = server
        .mock("POST", "/train-model")
        .with_status(400)
        .with_body(r#"{"detail": "Target column 'price' not found"}"#)
        .create();

    trainbench(&home)
        .args(["--backend-url", &server.url(), "train", "--session", "abc123", "--model", "LinearRegression"])
        .args(["--target", "price"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target column 'price' not found"));
}

#[test]
fn test_train_warns_on_unknown_param() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _defaults = server
        .mock("GET", "/hyperparameters")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"default_hyperparameters": {"n_clusters": 3}}"#)
        .create();
    let _train = server
        .mock("POST", "/train-model")
        .match_body(Matcher::Regex(r#"name="params"\r\n\r\n\{"n_clusters":3\}\r\n"#.to_string()))
        .with_status(200)
        .with_body(KMEANS_REPORT)
        .create();

    trainbench(&home)
        .args(["--backend-url", &server.url(), "train", "--session", "abc123", "--model", "KMeans"])
        .args(["--param", "bogus=1", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown hyperparameter 'bogus' ignored"))
        .stdout(predicate::str::contains("\"model_name\": \"KMeans\""));
}
