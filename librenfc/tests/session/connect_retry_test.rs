#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use librenfc::session::{ScanConfig, ScanPhase, Scanner};
use librenfc::transport::mock::Call;
use librenfc::Error;

#[tokio::test(start_paused = true)]
async fn connect_recovers_below_max_retries() {
    common::init_logger();
    let mut tag = common::fixtures::sample_tag();
    tag.connect_failures = 4;
    let rec = common::Recorder::new();
    let scanner = Scanner::with_observer(ScanConfig::default(), rec.clone());

    let start = tokio::time::Instant::now();
    let outcome = scanner.scan(&mut tag).await;

    assert!(outcome.is_success());
    assert_eq!(tag.count_calls(|c| *c == Call::Connect), 5);
    assert_eq!(rec.retries(ScanPhase::Connecting), 4);
    assert!(rec.phases().contains(&ScanPhase::InfoRetrieval));
    // four backoffs of 200 ms
    assert!(start.elapsed() >= Duration::from_millis(800));
}

#[tokio::test(start_paused = true)]
async fn connect_fails_at_max_retries() {
    common::init_logger();
    let mut tag = common::fixtures::sample_tag();
    tag.connect_failures = 5;
    let rec = common::Recorder::new();
    let scanner = Scanner::with_observer(ScanConfig::default(), rec.clone());

    let outcome = scanner.scan(&mut tag).await;

    assert_eq!(outcome.error(), Some(&Error::NoSensorFound { attempts: 5 }));
    assert_eq!(tag.count_calls(|c| *c == Call::Connect), 5);
    // nothing but connects and the final invalidate
    assert_eq!(tag.calls.len(), 6);
    assert_eq!(
        tag.calls.last(),
        Some(&Call::Invalidate(Some(
            "no sensor found after 5 attempts".to_string()
        )))
    );
    assert!(!rec.phases().contains(&ScanPhase::InfoRetrieval));
    assert_eq!(rec.phases().last(), Some(&ScanPhase::Failed));
}

#[tokio::test(start_paused = true)]
async fn custom_retry_bound() {
    let mut tag = common::fixtures::sample_tag();
    tag.connect_failures = 2;
    let scanner = Scanner::new(ScanConfig::default().with_max_retries(2));

    let outcome = scanner.scan(&mut tag).await;

    assert_eq!(outcome.error(), Some(&Error::NoSensorFound { attempts: 2 }));
}
