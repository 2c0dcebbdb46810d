//! Per-build box plot dataset tests.

mod common;

use common::builders::MeasurementBuilder;
use common::{days_ago, test_database};
use dashboard_insights::insights::boxplot::{
    build_dataset, build_identifiers, sample_size_control, PlotLayout,
};
use std::num::NonZeroU32;

#[tokio::test]
async fn test_no_builds_gives_no_dataset() {
    let db = test_database().await;
    let mut session = db.session().await.unwrap();

    assert_eq!(build_dataset(&mut session, None, None).await.unwrap(), None);
    assert_eq!(build_dataset(&mut session, Some("B"), NonZeroU32::new(3)).await.unwrap(), None);
}

#[tokio::test]
async fn test_build_without_measurements_gets_empty_series() {
    let db = test_database().await;
    let mut session = db.session().await.unwrap();

    MeasurementBuilder::new("B", 11.0).build("build_1").at(days_ago(4)).insert(&mut session).await;
    MeasurementBuilder::new("B", 12.0).build("build_2").at(days_ago(3)).insert(&mut session).await;
    MeasurementBuilder::new("A", 13.0).build("build_3").at(days_ago(2)).insert(&mut session).await;
    MeasurementBuilder::new("B", 14.0).build("build_4").at(days_ago(1)).insert(&mut session).await;
    MeasurementBuilder::new("B", 15.0).build("build_4").at(days_ago(1)).insert(&mut session).await;

    let builds = build_identifiers(&mut session, None).await.unwrap();
    assert_eq!(builds, vec!["build_4", "build_3", "build_2", "build_1"]);

    let dataset = build_dataset(&mut session, Some("B"), None)
        .await
        .unwrap()
        .expect("builds exist");

    assert_eq!(dataset.series.len(), builds.len());
    let labels: Vec<&str> = dataset.series.iter().map(|series| series.label.as_str()).collect();
    assert_eq!(labels, vec!["build_4 -", "build_3 -", "build_2 -", "build_1 -"]);

    assert_eq!(dataset.series[0].values, vec![14.0, 15.0]);
    assert!(dataset.series[1].values.is_empty());
    assert_eq!(dataset.series[3].values, vec![11.0]);
    assert!(dataset
        .series
        .iter()
        .all(|series| series.name.as_deref() == Some("B") && series.marker.is_none()));
    assert_eq!(dataset.layout, PlotLayout::default());
}

#[tokio::test]
async fn test_all_endpoints_use_neutral_marker() {
    let db = test_database().await;
    let mut session = db.session().await.unwrap();

    MeasurementBuilder::new("A", 1.0).build("1").at(days_ago(2)).insert(&mut session).await;
    MeasurementBuilder::new("B", 2.0).build("1").at(days_ago(2)).insert(&mut session).await;
    MeasurementBuilder::new("A", 3.0).build("2").at(days_ago(1)).insert(&mut session).await;

    let dataset = build_dataset(&mut session, None, None).await.unwrap().unwrap();

    assert_eq!(dataset.series.len(), 2);
    assert_eq!(dataset.series[0].label, "2 -");
    assert_eq!(dataset.series[1].values, vec![1.0, 2.0]);
    for series in &dataset.series {
        assert_eq!(series.name, None);
        assert_eq!(
            series.marker.as_ref().map(|marker| marker.color.as_str()),
            Some("rgb(105, 105, 105)")
        );
    }
}

#[tokio::test]
async fn test_build_limit_keeps_most_recent() {
    let db = test_database().await;
    let mut session = db.session().await.unwrap();

    for (build, days) in [("10", 5), ("11", 4), ("12", 3), ("13", 2)] {
        MeasurementBuilder::new("A", 1.0).build(build).at(days_ago(days)).insert(&mut session).await;
    }

    let dataset = build_dataset(&mut session, Some("A"), NonZeroU32::new(2))
        .await
        .unwrap()
        .unwrap();
    let labels: Vec<&str> = dataset.series.iter().map(|series| series.label.as_str()).collect();
    assert_eq!(labels, vec!["13 -", "12 -"]);
}

#[tokio::test]
async fn test_builds_sharing_a_timestamp_order_by_row_id() {
    let db = test_database().await;
    let mut session = db.session().await.unwrap();

    for build in ["b", "a", "c"] {
        MeasurementBuilder::new("A", 1.0).build(build).at(days_ago(1)).insert(&mut session).await;
    }

    let builds = build_identifiers(&mut session, None).await.unwrap();
    assert_eq!(builds, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn test_build_recency_across_stored_formats() {
    let db = test_database().await;
    let mut session = db.session().await.unwrap();

    MeasurementBuilder::new("A", 1.0)
        .build("41")
        .stored_as("2024-03-28 18:30:00")
        .insert(&mut session)
        .await;
    MeasurementBuilder::new("A", 1.0)
        .build("40")
        .stored_as("2024-03-28T07:00:00+00:00")
        .insert(&mut session)
        .await;

    let builds = build_identifiers(&mut session, NonZeroU32::new(1)).await.unwrap();
    assert_eq!(builds, vec!["41"]);
}

#[tokio::test]
async fn test_sample_size_control_tracks_available_builds() {
    let db = test_database().await;
    let mut session = db.session().await.unwrap();

    let empty = sample_size_control(&mut session, 10).await.unwrap();
    assert_eq!((empty.max, empty.value), (0, 0));
    assert_eq!(empty.build_limit(), None);

    for build in ["1", "2", "3"] {
        MeasurementBuilder::new("A", 1.0).build(build).insert(&mut session).await;
    }

    let control = sample_size_control(&mut session, 10).await.unwrap();
    assert_eq!((control.max, control.value), (3, 3));

    let control = sample_size_control(&mut session, 2).await.unwrap();
    assert_eq!(control.value, 2);
    assert_eq!(control.build_limit(), NonZeroU32::new(2));
}

#[tokio::test]
async fn test_dataset_serializes_for_chart_layer() {
    let db = test_database().await;
    let mut session = db.session().await.unwrap();

    MeasurementBuilder::new("A", 4.5).build("42").insert(&mut session).await;

    let dataset = build_dataset(&mut session, Some("A"), None).await.unwrap().unwrap();
    let json = dataset.to_json().unwrap();

    assert_eq!(json["series"][0]["label"], "42 -");
    assert_eq!(json["series"][0]["values"][0], 4.5);
    assert_eq!(json["layout"]["y_axis"]["title"], "Build");
}
