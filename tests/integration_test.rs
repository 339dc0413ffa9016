use image::GenericImageView;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shape-icon-gen"))
        .args(args)
        .output()
        .expect("Failed to run shape-icon-gen")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("shape-icon-gen command failed");
    }
}

fn assert_png(path: &Path, size: u32) {
    assert!(path.exists(), "{} should exist", path.display());
    let image = image::open(path).expect("Failed to decode PNG");
    assert_eq!(image.dimensions(), (size, size), "{}", path.display());
}

/// Default run renders the wand into every output format
#[test]
fn test_default_outputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let output = run(&["-o", output_dir.to_str().unwrap()]);
    assert_success(&output);

    assert_png(&output_dir.join("32x32.png"), 32);
    assert_png(&output_dir.join("128x128.png"), 128);
    assert_png(&output_dir.join("128x128@2x.png"), 256);
    assert_png(&output_dir.join("icon.png"), 512);

    let ico = std::fs::read(output_dir.join("icon.ico")).expect("Failed to read icon.ico");
    // reserved, type 1 (icon), six frames
    assert_eq!(&ico[..6], &[0, 0, 1, 0, 6, 0]);

    let icns = std::fs::read(output_dir.join("icon.icns")).expect("Failed to read icon.icns");
    assert_eq!(&icns[..4], b"icns");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Generated icon.ico"));
}

#[test]
fn test_custom_png_sizes() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("out");

    let output = run(&[
        "letter-e-tray",
        "--png",
        "16,22",
        "--filter",
        "box",
        "-o",
        output_dir.to_str().unwrap(),
    ]);
    assert_success(&output);

    assert_png(&output_dir.join("16x16.png"), 16);
    assert_png(&output_dir.join("22x22.png"), 22);
    assert!(!output_dir.join("icon.ico").exists());
    assert!(!output_dir.join("icon.png").exists());
}

#[test]
fn test_scene_file_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let scene_path = temp_dir.path().join("square.json");
    std::fs::write(
        &scene_path,
        r##"{
            "reference_size": 32,
            "background": "#0080ff",
            "shapes": [
                { "kind": "rect", "rect": [8, 8, 24, 24], "fill": { "solid": "white" } }
            ]
        }"##,
    )
    .expect("Failed to write scene");
    let output_dir = temp_dir.path().join("out");

    let output = run(&[
        scene_path.to_str().unwrap(),
        "--png-only",
        "--filter",
        "box",
        "-o",
        output_dir.to_str().unwrap(),
    ]);
    assert_success(&output);

    let image = image::open(output_dir.join("32x32.png"))
        .expect("Failed to decode PNG")
        .to_rgba8();
    assert_eq!(image.get_pixel(0, 0).0, [0, 128, 255, 255]);
    assert_eq!(image.get_pixel(16, 16).0, [255, 255, 255, 255]);
    assert!(!output_dir.join("icon.icns").exists());
}

#[test]
fn test_list_icons() {
    let output = run(&["--list"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == "wand"));
    assert!(stdout.lines().any(|line| line == "sorcerer-hat-stars"));
}

#[test]
fn test_unknown_icon_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = run(&["not-an-icon", "-o", temp_dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown icon"), "{stderr}");
}

#[test]
fn test_conflicting_format_flags() {
    let output = run(&["--ico-only", "--icns-only"]);
    assert!(!output.status.success());
}

/// Opaque shapes look the same whether they replace or blend
#[test]
fn test_composite_mode_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut renders = Vec::new();
    for mode in ["overwrite", "blend"] {
        let output_dir = temp_dir.path().join(mode);
        let output = run(&[
            "letter-h",
            "--mode",
            mode,
            "--png",
            "24",
            "-o",
            output_dir.to_str().unwrap(),
        ]);
        assert_success(&output);
        let image = image::open(output_dir.join("24x24.png"))
            .expect("Failed to decode PNG")
            .to_rgba8();
        renders.push(image.into_raw());
    }
    assert_eq!(renders[0], renders[1]);

    let output = run(&["--mode", "multiply", "-o", temp_dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
}
