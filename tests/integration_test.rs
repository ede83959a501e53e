use image::{Rgba, RgbaImage};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ALL_ICONS: [&str; 8] = [
    "play", "shop", "wallet", "quests", "profile", "settings", "cash_out", "sound",
];

/// Runs `icon-grid` with the given icon names present in a fresh input dir and
/// asserts that the full-size sheet is written, with one warning per missing icon.
#[test]
fn test_grid_with_two_missing_icons() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_dir = temp_dir.path().join("icons");
    std::fs::create_dir(&input_dir).unwrap();

    let present: Vec<_> = ALL_ICONS
        .iter()
        .copied()
        .filter(|name| *name != "shop" && *name != "sound")
        .collect();
    for name in &present {
        create_dummy_2048_icon(&input_dir.join(format!("icon_{name}_2048.png")));
    }

    let output_path = temp_dir.path().join("grid.png");
    let output = run_icon_grid(&[input_dir.as_os_str(), output_path.as_os_str()]);

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("icon-grid command failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let created: Vec<_> = stdout.lines().filter(|line| line.contains("created")).collect();
    assert_eq!(created.len(), 1, "stdout: {stdout}");
    assert!(created[0].contains(&output_path.display().to_string()));
    assert!(created[0].contains("8692x4636px"));
    assert!(created[0].starts_with("✓ Grid composition created: "));
    assert!(!stdout.contains("Size:"), "size belongs on the created line");
    assert_eq!(stdout.matches("Labels drawn with ").count(), 1);
    assert_eq!(stdout.matches("✓ Placed").count(), 6);

    let warnings: Vec<_> = stderr.lines().filter(|line| line.contains("not found")).collect();
    assert_eq!(warnings.len(), 2, "stderr: {stderr}");
    for missing in ["icon_shop_2048.png", "icon_sound_2048.png"] {
        let expected = input_dir.join(missing).display().to_string();
        assert!(
            warnings.iter().any(|line| line.contains(&expected)),
            "no warning for {expected}"
        );
    }

    let (width, height) =
        image::image_dimensions(&output_path).expect("Output should be a readable PNG");
    assert_eq!((width, height), (8692, 4636));
}

#[test]
fn test_icon_set_with_wrong_count_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let icons_json = temp_dir.path().join("icons.json");
    std::fs::write(
        &icons_json,
        r##"[{ "name": "play", "label": "Play", "color": "#FF5DA2" }]"##,
    )
    .unwrap();

    let output_path = temp_dir.path().join("grid.png");
    let output = run_icon_grid(&[
        temp_dir.path().as_os_str(),
        output_path.as_os_str(),
        OsStr::new("--icons"),
        icons_json.as_os_str(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exactly 8"));
    assert!(!output_path.exists());
}

#[test]
fn test_missing_output_directory_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("missing").join("grid.png");

    let output = run_icon_grid(&[temp_dir.path().as_os_str(), output_path.as_os_str()]);

    assert!(
        !output.status.success(),
        "icon-grid should fail when the output directory does not exist"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to create output file"), "stderr: {stderr}");
    assert!(!output_path.exists());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("created"));
}

fn run_icon_grid(args: &[&OsStr]) -> Output {
    Command::new(icon_grid_binary_path())
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run icon-grid command")
}

/// Creates a 2048x2048 RGBA icon: an opaque disc on a transparent square.
fn create_dummy_2048_icon(path: &Path) {
    let size = 2048;
    let radius = (size / 2) as f32;

    let image = RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - radius;
        let dy = y as f32 - radius;
        if dx * dx + dy * dy <= radius * radius {
            Rgba([255, 93, 162, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });

    image.save(path).expect("Failed to save dummy icon");
}

fn icon_grid_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_icon-grid"))
}
