use assert_cmd::Command;
use std::fs::{self, File};
use std::io::Write;

#[test]
fn trajectory_plot_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("feed.csv");
    let png_path = dir.path().join("plots").join("trajectory.png");

    let mut file = File::create(&csv_path).expect("csv create");
    writeln!(file, "time,utc,x_au,y_au,z_au,phase,mission_index").unwrap();
    for i in 0..40 {
        let t = i as f64 * 10.0;
        let angle = t / 58.0;
        let r = 1.2 + 0.4 * (i as f64 / 39.0);
        let phase = if i < 10 { "source_parking" } else { "outbound_transfer" };
        writeln!(
            file,
            "{t},2000-01-01T12:00:00,{:.6},{:.6},0.0,{phase},0",
            r * angle.cos(),
            r * angle.sin()
        )
        .unwrap();
    }

    Command::cargo_bin("trajectory_plot")
        .expect("trajectory_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "400",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn trajectory_plot_rejects_feeds_without_positions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("feed.csv");
    fs::write(&csv_path, "time,utc,phase\n0.0,x,source_parking\n").unwrap();

    Command::cargo_bin("trajectory_plot")
        .expect("trajectory_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            dir.path().join("out.png").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("x_au"));
}

#[test]
fn library_reports_version() {
    assert_eq!(solar_shuttle::version(), env!("CARGO_PKG_VERSION"));
}
