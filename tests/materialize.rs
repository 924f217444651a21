use std::num::NonZeroUsize;

use chrono::{Duration, TimeZone, Utc};
use materializer::{
    benchmark, models::record_key, transform, Config, DangerLevel, Error, Materializer,
    Measurement, MeasurementSource, SurrealStore, SystemClock, ViewWriter,
};
use pretty_assertions::assert_eq;

fn measurement(id: i64, temperature: f64, humidity: f64, latency_us: i64) -> Measurement {
    let created_on = Utc.with_ymd_and_hms(2022, 6, 1, 9, 0, 0).unwrap() + Duration::seconds(id);
    Measurement {
        id,
        sensor_id: 100 + id % 4,
        temperature,
        humidity,
        event_stream: if id % 2 == 0 { "kafka" } else { "mqtt" }.into(),
        created_on,
        processed_on: created_on + Duration::microseconds(latency_us),
    }
}

async fn store_with(measurements: &[Measurement]) -> SurrealStore {
    let store = SurrealStore::connect(&Config::in_memory("test"))
        .await
        .unwrap();
    for m in measurements {
        store.append_measurement(m).await.unwrap();
    }
    store
}

#[tokio::test]
async fn event_store_is_read_in_id_order() {
    let input = [
        measurement(12, 1.0, 1.0, 10),
        measurement(2, 1.0, 1.0, 10),
        measurement(7, 1.0, 1.0, 10),
    ];
    let store = store_with(&input).await;

    let ids: Vec<i64> = store
        .fetch_all()
        .await
        .unwrap()
        .iter()
        .map(|m| m.id)
        .collect();

    assert_eq!(ids, vec![2, 7, 12]);
}

#[tokio::test]
async fn view_is_rebuilt_from_the_event_store() {
    let input = [
        measurement(1, 11.0, 10.0, 1_500),
        measurement(2, 2.0, 45.0, 250),
        measurement(3, 0.0, 0.0, 0),
    ];
    let store = store_with(&input).await;
    let materializer = Materializer::new(store.clone(), store.clone());

    assert_eq!(materializer.run(&()).await.unwrap(), 3);

    let rows = store.view_rows().await.unwrap();
    let summary: Vec<(Option<i64>, DangerLevel, f64)> = rows
        .iter()
        .map(|r| (record_key(&r.id), r.danger_level, r.latency_ms))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some(1), DangerLevel::Critical, 1.5),
            (Some(2), DangerLevel::Medium, 0.25),
            (Some(3), DangerLevel::No, 0.0),
        ]
    );
    assert_eq!(rows[1].event_stream, "kafka");
    assert_eq!(rows[1].sensor_id, 102);
    assert_eq!(rows[1].humidity, 45.0);
}

#[tokio::test]
async fn empty_event_store_empties_the_view() {
    let store = store_with(&[measurement(1, 0.0, 0.0, 5)]).await;
    let materializer = Materializer::new(store.clone(), store.clone());
    materializer.run(&()).await.unwrap();
    assert_eq!(store.view_rows().await.unwrap().len(), 1);

    store.db().query("DELETE event_store").await.unwrap();

    assert_eq!(materializer.run(&()).await.unwrap(), 0);
    assert!(store.view_rows().await.unwrap().is_empty());
}

#[tokio::test]
async fn repeated_runs_are_idempotent() {
    let input: Vec<Measurement> = (1..=10)
        .map(|i| measurement(i, i as f64 * 1.3, i as f64 * 6.0, i * 333))
        .collect();
    let store = store_with(&input).await;
    let materializer = Materializer::new(store.clone(), store.clone());

    materializer.run(&()).await.unwrap();
    let first = store.view_rows().await.unwrap();
    materializer.run(&()).await.unwrap();
    let second = store.view_rows().await.unwrap();

    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
}

#[tokio::test]
async fn benchmark_runs_every_iteration() {
    let input: Vec<Measurement> = (1..=5).map(|i| measurement(i, 4.0, 10.0, 100)).collect();
    let store = store_with(&input).await;
    let materializer = Materializer::new(store.clone(), store.clone());

    let stats = benchmark(
        &materializer,
        NonZeroUsize::new(3).unwrap(),
        &SystemClock,
        &(),
    )
    .await
    .unwrap();

    assert_eq!(stats.iterations, 3);
    assert_eq!(stats.record_count, 5);
    assert_eq!(stats.durations.len(), 3);
    assert!(stats.min <= stats.median && stats.median <= stats.max);
    assert!(stats.variance >= 0.0);
    assert_eq!(store.view_rows().await.unwrap().len(), 5);
}

#[tokio::test]
async fn duplicate_view_row_is_a_constraint_violation() {
    let store = store_with(&[]).await;
    let row = transform(measurement(1, 0.0, 0.0, 10));

    store.insert(&row).await.unwrap();
    let err = store.insert(&row).await.unwrap_err();

    assert!(
        matches!(err, Error::Constraint { id: 1, .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn duplicate_event_is_a_constraint_violation() {
    let store = store_with(&[measurement(4, 0.0, 0.0, 10)]).await;

    let err = store
        .append_measurement(&measurement(4, 1.0, 1.0, 20))
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::Constraint { id: 4, .. }),
        "unexpected error: {err}"
    );
}
