use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "quest-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn listed_scenarios() -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_quest-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    content
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(" - "))
        .map(|(key, _)| key.trim().to_string())
        .collect()
}

#[test]
fn cli_lists_every_scenario() {
    let keys = listed_scenarios();
    assert_eq!(keys.len(), 10);
    assert!(keys.iter().any(|key| key == "full-quest"));
    assert!(keys.iter().any(|key| key == "certificate-gate"));
}

#[test]
fn every_listed_scenario_passes_for_seed_1337() {
    let exe = env!("CARGO_BIN_EXE_quest-tester");
    for key in listed_scenarios() {
        let output_path = temp_path(&key);
        let output = Command::new(exe)
            .args([
                "--scenarios",
                &key,
                "--seeds",
                "1337",
                "--iterations",
                "2",
                "--report",
                "json",
                "--output",
            ])
            .arg(&output_path)
            .output()
            .expect("run cli");
        assert!(
            output.status.success(),
            "{key} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let report = std::fs::read_to_string(&output_path).expect("read report");
        let results: Vec<serde_json::Value> = serde_json::from_str(&report).expect("json report");
        assert_eq!(results.len(), 1, "{key} should run once for one seed");
        assert_eq!(results[0]["seed"], 1337);
        assert_eq!(results[0]["passed"], true, "{key}: {}", results[0]["failures"]);
    }
}

#[test]
fn cli_writes_pdf_certificate() {
    let exe = env!("CARGO_BIN_EXE_quest-tester");
    let output_path = temp_path("certificate").with_extension("pdf");
    let output = Command::new(exe)
        .arg("--certificate")
        .arg(&output_path)
        .args(["--player", "Ada Lovelace"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PowerBI_Certificate_Ada_Lovelace"));
    let bytes = std::fs::read(output_path).expect("read certificate");
    assert!(bytes.starts_with(b"%PDF"));
}
