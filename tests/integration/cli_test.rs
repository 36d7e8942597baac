// Integration tests for the owl-overlay command line
//
// Each test builds a temporary deck and runs the compiled binary,
// checking exit codes, written files, and stderr output.

use crate::integration::test_harness::CliTestHarness;
use std::io::Write;

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_missing_input_dir_prints_usage_and_presets() {
    let harness = CliTestHarness::with_slides(&[]);
    let output = harness.command().output().expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Usage"), "stderr: {}", err);
    assert!(err.contains("Available presets"), "stderr: {}", err);
    for name in ["bottom-right", "bottom-left", "top-right", "mid-right"] {
        assert!(err.contains(name), "missing preset {} in: {}", name, err);
    }
}

#[test]
fn test_processes_deck_into_sibling_directory() {
    let harness = CliTestHarness::with_slides(&["slide_01.png", "slide_02.png"]);
    std::fs::write(harness.input_dir.join("README.md"), "notes").unwrap();

    let output = harness.run(&[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out_dir = harness.default_output_dir();
    assert_eq!(
        CliTestHarness::listing(&out_dir),
        vec!["slide_01.png", "slide_02.png"]
    );

    let decoded = image::open(out_dir.join("slide_01.png")).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (360, 640));
    assert_eq!(decoded.color(), image::ColorType::Rgb8);
}

#[test]
fn test_explicit_output_and_preset() {
    let harness = CliTestHarness::with_slides(&["slide_intro.png"]);
    let out_dir = harness.root().join("rendered").join("v2");

    let output = harness.run(&["mid-right", "-o", out_dir.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(CliTestHarness::listing(&out_dir), vec!["slide_intro.png"]);
    assert!(!harness.default_output_dir().exists());
}

#[test]
fn test_empty_deck_succeeds_with_empty_output() {
    let harness = CliTestHarness::with_slides(&[]);

    let output = harness.run(&[]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(harness.default_output_dir().is_dir());
    assert!(CliTestHarness::listing(&harness.default_output_dir()).is_empty());
}

#[test]
fn test_unknown_preset_falls_back_to_default() {
    let harness = CliTestHarness::with_slides(&["slide_01.png"]);
    let named_dir = harness.root().join("named");
    let unknown_dir = harness.root().join("unknown");

    let named = harness.run(&["bottom-right", "-o", named_dir.to_str().unwrap()]);
    let unknown = harness.run(&["sideways", "-o", unknown_dir.to_str().unwrap()]);
    assert!(named.status.success());
    assert!(unknown.status.success(), "stderr: {}", stderr(&unknown));

    let a = image::open(named_dir.join("slide_01.png")).unwrap().to_rgb8();
    let b = image::open(unknown_dir.join("slide_01.png")).unwrap().to_rgb8();
    assert_eq!(a, b);
}

#[test]
fn test_strict_rejects_unknown_preset() {
    let harness = CliTestHarness::with_slides(&["slide_01.png"]);

    let output = harness.run(&["sideways", "--strict"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("sideways"));
    assert!(!harness.default_output_dir().exists());
}

#[test]
fn test_missing_overlay_asset_fails() {
    let harness = CliTestHarness::with_slides(&["slide_01.png"]);
    std::fs::remove_file(&harness.overlay_path).unwrap();

    let output = harness.run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("owl_image_nobg.png"));
}

#[test]
fn test_corrupt_slide_aborts_batch() {
    let harness = CliTestHarness::with_slides(&["slide_01.png", "slide_03.png"]);
    std::fs::write(harness.input_dir.join("slide_02.png"), b"not a png").unwrap();

    let output = harness.run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("slide_02.png"));

    // Slides before the failure were already written
    assert_eq!(
        CliTestHarness::listing(&harness.default_output_dir()),
        vec!["slide_01.png"]
    );
}

#[test]
fn test_keep_going_processes_remaining_slides() {
    let harness = CliTestHarness::with_slides(&["slide_01.png", "slide_03.png"]);
    std::fs::write(harness.input_dir.join("slide_02.png"), b"not a png").unwrap();

    let output = harness.run(&["--keep-going"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed:"));
    assert_eq!(
        CliTestHarness::listing(&harness.default_output_dir()),
        vec!["slide_01.png", "slide_03.png"]
    );
}

#[test]
fn test_custom_preset_file() {
    let harness = CliTestHarness::with_slides(&["slide_01.png"]);
    let presets_path = harness.root().join("presets.yaml");
    let mut file = std::fs::File::create(&presets_path).unwrap();
    writeln!(
        file,
        "presets:\n  - name: corner\n    position: top-right\n    size_percent: 25\n    opacity: 0.5\ndefault: corner"
    )
    .unwrap();

    let output = harness.run(&[
        "corner",
        "--strict",
        "--presets",
        presets_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        CliTestHarness::listing(&harness.default_output_dir()),
        vec!["slide_01.png"]
    );
}

#[test]
fn test_invalid_preset_file_fails() {
    let harness = CliTestHarness::with_slides(&["slide_01.png"]);
    let presets_path = harness.root().join("presets.yaml");
    std::fs::write(&presets_path, "presets: []\n").unwrap();

    let output = harness.run(&["--presets", presets_path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("presets.yaml"));
}

#[test]
fn test_json_log_format() {
    let harness = CliTestHarness::with_slides(&["slide_01.png"]);

    let output = harness
        .command()
        .env("RUST_LOG", "info")
        .arg(&harness.input_dir)
        .args(["--log-format", "json"])
        .output()
        .expect("Failed to run binary");
    assert!(output.status.success());

    let err = stderr(&output);
    let lines: Vec<&str> = err.lines().filter(|l| !l.trim().is_empty()).collect();
    assert!(!lines.is_empty());
    for line in lines {
        assert!(line.starts_with('{'), "not JSON: {}", line);
    }
}
