use std::fs;

use solar_shuttle::config::PlannerConfig;
use solar_shuttle::export::epoch::Epoch;
use solar_shuttle::export::feed::{self as feed_export, Metadata};
use solar_shuttle::export::{ExportError, schedule};
use solar_shuttle::feed::{self, FeedError};
use solar_shuttle::transfer::ScheduleTimeline;

fn epoch() -> Epoch {
    Epoch::parse("2000-01-01T12:00:00").expect("epoch")
}

#[test]
fn epoch_labels_simulated_days() {
    let epoch = epoch();
    assert_eq!(epoch.label(0.0), "2000-01-01T12:00:00");
    assert_eq!(epoch.label(0.5), "2000-01-02T00:00:00");
    assert_eq!(epoch.label(-1.0), "1999-12-31T12:00:00");
    assert_eq!(epoch.label(1.0 / 86_400.0), "2000-01-01T12:00:01");
    assert_eq!(epoch.label(f64::NAN), "n/a");
    assert!(matches!(
        Epoch::parse("January 1st"),
        Err(ExportError::Epoch(_))
    ));
}

#[test]
fn schedule_csv_lists_every_mission() {
    let mut timeline = ScheduleTimeline::from_config(&PlannerConfig::default()).unwrap();
    feed::plan_through(&mut timeline, 1_500.0).unwrap();
    let records = feed::schedule_records(&timeline, &epoch());
    assert_eq!(records.len(), timeline.len());

    let mut buffer = Vec::new();
    schedule::write_csv(&mut buffer, &records).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "mission_index,t_start,t_launch,t_arrival_outbound,t_depart_return,t_arrival_return,launch_utc,arrival_outbound_utc,depart_return_utc,arrival_return_utc"
    );
    assert_eq!(lines.count(), records.len());
    assert!(text.contains(&records[0].launch_utc));
}

#[test]
fn feed_samples_cover_the_requested_range() {
    let mut timeline = ScheduleTimeline::from_config(&PlannerConfig::default()).unwrap();
    let samples = feed::sample_range(&mut timeline, &epoch(), 0.0, 100.0, 10.0).unwrap();
    assert_eq!(samples.len(), 11);
    assert_eq!(samples[0].time, 0.0);
    assert_eq!(samples[10].time, 100.0);
    assert!(samples.iter().all(|s| s.phase == "source_parking"));
    assert!(samples.iter().all(|s| s.mission_index == 0));
    assert_eq!(samples[2].utc, "2000-01-21T12:00:00");
}

#[test]
fn feed_rejects_bad_ranges() {
    let mut timeline = ScheduleTimeline::from_config(&PlannerConfig::default()).unwrap();
    let epoch = epoch();
    assert!(matches!(
        feed::sample_range(&mut timeline, &epoch, 0.0, 10.0, 0.0),
        Err(FeedError::InvalidStep(_))
    ));
    assert!(matches!(
        feed::sample_range(&mut timeline, &epoch, 10.0, 0.0, 1.0),
        Err(FeedError::EmptyRange { .. })
    ));
    assert!(matches!(
        feed::sample_range(&mut timeline, &epoch, 0.0, 1.0e9, 1.0),
        Err(FeedError::TooManySamples { .. })
    ));
    assert!(matches!(
        feed::sample_range(&mut timeline, &epoch, -5.0, 5.0, 1.0),
        Err(FeedError::Planning(_))
    ));
}

#[test]
fn feed_csv_and_sidecar_are_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("out").join("feed.csv");
    let mut timeline = ScheduleTimeline::from_config(&PlannerConfig::default()).unwrap();
    let epoch = epoch();
    let samples = feed::sample_range(&mut timeline, &epoch, 0.0, 600.0, 5.0).unwrap();
    let records = feed::schedule_records(&timeline, &epoch);

    let writer = solar_shuttle::export::writer_for_path(&output).unwrap();
    feed_export::write_csv(writer, &samples).unwrap();
    let meta = Metadata {
        source: "EARTH",
        target: "MARS",
        epoch_utc: "2000-01-01T12:00:00",
    };
    let sidecar = feed_export::write_sidecar(&output, &meta, &samples, &records).unwrap();
    assert_eq!(sidecar, dir.path().join("out").join("feed_schedule.json"));

    let csv_text = fs::read_to_string(&output).unwrap();
    assert!(csv_text.starts_with("time,utc,x_au,y_au,z_au,phase,mission_index"));
    assert!(csv_text.contains("outbound_transfer"));
    assert_eq!(csv_text.lines().count(), samples.len() + 1);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&sidecar).unwrap()).unwrap();
    assert_eq!(json["source"], "EARTH");
    assert_eq!(json["sample_count"], samples.len());
    assert_eq!(json["last_time"], 600.0);
    assert_eq!(json["schedules"].as_array().unwrap().len(), records.len());
}
