//! Integration tests for blobby CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the blobby binary built for this test run.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_blobby"))
}

/// A scratch path unique to this process and test.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("blobby-it-{}-{}", std::process::id(), name))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        // Keep ./blobby.yaml from a developer checkout out of the picture
        .current_dir(std::env::temp_dir())
        .output()
        .expect("Failed to execute command")
}

fn json_for(args: &[&str]) -> serde_json::Value {
    let mut full = vec!["generate", "-f", "json"];
    full.extend_from_slice(args);
    let output = run(&full);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn help_command_shows_usage() {
    let output = run(&["help"]);
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(combined.contains("generate"), "Should mention generate command");
    assert!(combined.contains("--scatter"), "Should list scatter option");
    assert!(combined.contains("Refresh"), "Should describe editor controls");
}

#[test]
fn generate_json_respects_vertex_range() {
    for seed in ["1", "2", "3", "4", "5"] {
        let json = json_for(&["--min", "4", "--max", "6", "--seed", seed]);
        let n = json["vertex_count"].as_u64().unwrap();
        assert!((4..=6).contains(&n), "seed {} drew {} vertices", seed, n);
        assert_eq!(json["vertices"].as_array().unwrap().len() as u64, n + 1);
    }
}

#[test]
fn generate_json_curve_is_closed() {
    let json = json_for(&["--seed", "12"]);
    let curve = json["curve"].as_array().unwrap();
    assert_eq!(curve.len(), 300);

    let first = &curve[0];
    let last = &curve[299];
    let dx = first["x"].as_f64().unwrap() - last["x"].as_f64().unwrap();
    let dy = first["y"].as_f64().unwrap() - last["y"].as_f64().unwrap();
    assert!(dx.hypot(dy) < 1e-9, "curve should close, gap {}", dx.hypot(dy));
}

#[test]
fn zero_scatter_generates() {
    let json = json_for(&["-n", "3", "-x", "3", "-s", "0", "--seed", "8"]);
    assert_eq!(json["vertex_count"], 3);
    assert_eq!(json["params"]["scatter"], 0.0);
}

#[test]
fn same_seed_same_output() {
    let a = run(&["generate", "-f", "svg", "--seed", "99"]);
    let b = run(&["generate", "-f", "svg", "--seed", "99"]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);

    let c = run(&["generate", "-f", "svg", "--seed", "100"]);
    assert_ne!(a.stdout, c.stdout);
}

#[test]
fn generate_svg_to_stdout() {
    let output = run(&["generate", "-f", "svg", "--seed", "3", "-w", "2.5"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("<path"), "Should have the curve path");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn generate_png_is_rgba() {
    let path = temp_path("shape.png");
    let output = run(&["generate", "--seed", "5", "--size", "200", "-o", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let bytes = std::fs::read(&path).expect("PNG should be written");
    let _ = std::fs::remove_file(&path);

    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "PNG signature");
    // IHDR: width and height at 16..24, color type at 25 (6 = RGBA)
    assert_eq!(u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]), 200);
    assert_eq!(u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]), 200);
    assert_eq!(bytes[25], 6, "PNG should be RGBA");
}

#[test]
fn png_extension_is_added() {
    let base = temp_path("noext");
    let output = run(&["generate", "--seed", "5", "--size", "64", "-o", base.to_str().unwrap()]);
    assert!(output.status.success());

    let written = base.with_extension("png");
    assert!(written.exists(), "expected {:?}", written);
    let _ = std::fs::remove_file(&written);
}

#[test]
fn min_above_max_fails_without_output() {
    let path = temp_path("never.png");
    let output = run(&["generate", "-n", "9", "-x", "5", "-o", path.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 3"), "stderr: {}", stderr);
    assert!(!path.exists(), "no image should be written on validation failure");
}

#[test]
fn below_three_vertices_fails() {
    let output = run(&["generate", "-f", "json", "-n", "2", "-x", "2"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn non_numeric_parameter_fails() {
    let output = run(&["generate", "-f", "json", "-s", "lots"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Scatter"), "stderr: {}", stderr);
}

#[test]
fn line_width_changes_only_the_stroke() {
    let thin = run(&["generate", "-f", "json", "--seed", "31", "-w", "1"]);
    let thick = run(&["generate", "-f", "json", "--seed", "31", "-w", "4"]);

    let thin: serde_json::Value = serde_json::from_slice(&thin.stdout).unwrap();
    let thick: serde_json::Value = serde_json::from_slice(&thick.stdout).unwrap();
    assert_eq!(thin["curve"], thick["curve"]);
    assert_ne!(thin["params"]["line_width"], thick["params"]["line_width"]);
}

#[test]
fn config_file_supplies_defaults() {
    let config = temp_path("config.yaml");
    std::fs::write(&config, "params:\n  min_vertices: 5\n  max_vertices: 5\n").unwrap();

    let json = json_for(&["--seed", "2", "-c", config.to_str().unwrap()]);
    let _ = std::fs::remove_file(&config);

    assert_eq!(json["vertex_count"], 5);
}

#[test]
fn flags_override_config_file() {
    let config = temp_path("override.yaml");
    std::fs::write(&config, "params:\n  min_vertices: 5\n  max_vertices: 5\n").unwrap();

    let json = json_for(&["--seed", "2", "-c", config.to_str().unwrap(), "-n", "7", "-x", "7"]);
    let _ = std::fs::remove_file(&config);

    assert_eq!(json["vertex_count"], 7);
}

#[test]
fn unknown_flag_fails() {
    let output = run(&["generate", "--bogus"]);
    assert!(!output.status.success());
}
