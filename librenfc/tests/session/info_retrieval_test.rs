#[path = "../common/mod.rs"]
mod common;

use librenfc::session::{ScanConfig, ScanPhase, Scanner};
use librenfc::transport::mock::Call;
use librenfc::{Error, TransportError};

fn quick_config() -> ScanConfig {
    ScanConfig::default().with_retry_backoff(std::time::Duration::ZERO)
}

#[tokio::test]
async fn short_patch_info_fails_before_bulk_read() {
    common::init_logger();
    let mut tag = common::fixtures::sample_tag();
    tag.patch_info = vec![0x9d, 0x08, 0x30, 0x01, 0x00];
    let rec = common::Recorder::new();
    let scanner = Scanner::with_observer(quick_config(), rec.clone());

    let outcome = scanner.scan(&mut tag).await;

    let err = outcome.error().unwrap();
    assert_eq!(err, &Error::InvalidPatchInfo { length: 5 });
    assert!(err.is_protocol_violation());
    assert_eq!(tag.count_calls(|c| matches!(c, Call::ReadBlocks(_))), 0);
    assert!(!rec.phases().contains(&ScanPhase::BulkRead));
    assert!(tag.is_invalidated());
}

#[tokio::test]
async fn patch_info_retried_with_system_info() {
    let mut tag = common::fixtures::sample_tag();
    // priming read ok, authoritative read fails once
    tag.push_patch_info(Ok(common::fixtures::sample_patch_info()));
    tag.push_patch_info(Err(TransportError::Timeout));
    let rec = common::Recorder::new();
    let scanner = Scanner::with_observer(quick_config(), rec.clone());

    let outcome = scanner.scan(&mut tag).await;

    assert!(outcome.is_success());
    assert_eq!(tag.count_calls(|c| *c == Call::SystemInfo), 2);
    assert_eq!(rec.retries(ScanPhase::InfoRetrieval), 1);
}

#[tokio::test]
async fn patch_info_failures_leave_system_info_budget_intact() {
    common::init_logger();
    let mut tag = common::fixtures::sample_tag();
    // priming reads succeed, the four authoritative reads fail
    for _ in 0..4 {
        tag.push_patch_info(Ok(common::fixtures::sample_patch_info()));
        tag.push_patch_info(Err(TransportError::Timeout));
    }
    // fifth system info call fails once
    tag.fail_system_info_at = vec![4];
    let rec = common::Recorder::new();
    let scanner = Scanner::with_observer(quick_config(), rec.clone());

    let outcome = scanner.scan(&mut tag).await;

    assert!(outcome.is_success(), "{:?}", outcome.error());
    assert_eq!(tag.count_calls(|c| *c == Call::SystemInfo), 6);
    assert_eq!(rec.retries(ScanPhase::InfoRetrieval), 5);
}

#[tokio::test]
async fn system_info_failures_leave_patch_info_budget_intact() {
    let mut tag = common::fixtures::sample_tag();
    tag.system_info_failures = 4;
    // five priming reads, then the first authoritative read fails
    for _ in 0..5 {
        tag.push_patch_info(Ok(common::fixtures::sample_patch_info()));
    }
    tag.push_patch_info(Err(TransportError::Timeout));
    tag.push_patch_info(Ok(common::fixtures::sample_patch_info()));
    tag.push_patch_info(Ok(vec![0x70, 0, 0, 0, 0, 0]));
    let scanner = Scanner::new(quick_config());

    let result = scanner.scan(&mut tag).await.into_result().unwrap();

    // patch info was retried rather than taken best-effort
    assert_eq!(result.patch_info.as_bytes(), &[0x70, 0, 0, 0, 0, 0]);
    assert_eq!(tag.count_calls(|c| *c == Call::SystemInfo), 6);
    assert_eq!(
        tag.count_calls(|c| matches!(c, Call::Custom { code: 0xA1, parameters } if parameters.is_empty())),
        8
    );
}

#[tokio::test]
async fn best_effort_patch_info_after_exhausted_retries() {
    common::init_logger();
    let mut tag = common::fixtures::sample_tag();
    // Only the very first priming read succeeds; every later 0xA1 fails.
    tag.push_patch_info(Ok(common::fixtures::sample_patch_info()));
    for _ in 0..9 {
        tag.push_patch_info(Err(TransportError::TagLost));
    }
    let scanner = Scanner::new(quick_config());

    let result = scanner.scan(&mut tag).await.into_result().unwrap();

    assert_eq!(result.patch_info.as_bytes(), &common::fixtures::sample_patch_info()[..]);
    assert_eq!(tag.count_calls(|c| *c == Call::SystemInfo), 5);
    assert_eq!(result.memory.len(), 344);
}

#[tokio::test]
async fn no_patch_info_at_all_is_invalid() {
    let mut tag = common::fixtures::sample_tag();
    for _ in 0..10 {
        tag.push_patch_info(Err(TransportError::TagLost));
    }
    let scanner = Scanner::new(quick_config());

    let outcome = scanner.scan(&mut tag).await;

    assert_eq!(outcome.error(), Some(&Error::InvalidPatchInfo { length: 0 }));
    assert_eq!(tag.count_calls(|c| matches!(c, Call::ReadBlocks(_))), 0);
}

#[tokio::test]
async fn bulk_read_failure_is_fatal() {
    let mut tag = common::fixtures::sample_tag();
    tag.fail_read_at = Some(7);
    let scanner = Scanner::new(quick_config());

    let outcome = scanner.scan(&mut tag).await;

    assert_eq!(
        outcome.error(),
        Some(&Error::Transport(TransportError::TagLost))
    );
    assert_eq!(tag.count_calls(|c| matches!(c, Call::ReadBlocks(_))), 8);
    assert!(matches!(tag.calls.last(), Some(Call::Invalidate(Some(_)))));
}
