#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use librenfc::session::{CancelToken, ScanConfig, ScanEvent, ScanObserver, ScanPhase, Scanner};
use librenfc::transport::mock::Call;
use librenfc::Error;

/// Cancels the scan when it sees `trigger`.
struct CancelOn {
    trigger: ScanEvent,
    token: CancelToken,
}

impl ScanObserver for CancelOn {
    fn on_event(&self, event: &ScanEvent) {
        if *event == self.trigger {
            self.token.cancel();
        }
    }
}

#[tokio::test]
async fn cancelled_before_start() {
    let mut tag = common::fixtures::sample_tag();
    let token = CancelToken::new();
    token.cancel();
    let scanner = Scanner::new(ScanConfig::default()).with_cancel_token(token);

    let outcome = scanner.scan(&mut tag).await;

    assert_eq!(outcome.error(), Some(&Error::Cancelled));
    assert_eq!(
        tag.calls,
        vec![Call::Invalidate(Some("scan cancelled".to_string()))]
    );
}

#[tokio::test(start_paused = true)]
async fn cancelled_inside_connect_retry_loop() {
    let mut tag = common::fixtures::sample_tag();
    tag.connect_failures = 3;
    let token = CancelToken::new();
    let observer = Arc::new(CancelOn {
        trigger: ScanEvent::Retrying {
            phase: ScanPhase::Connecting,
            attempt: 1,
            max: 5,
        },
        token: token.clone(),
    });
    let scanner =
        Scanner::with_observer(ScanConfig::default(), observer).with_cancel_token(token);

    let outcome = scanner.scan(&mut tag).await;

    assert_eq!(outcome.error(), Some(&Error::Cancelled));
    assert_eq!(tag.count_calls(|c| *c == Call::Connect), 1);
    assert!(tag.is_invalidated());
}

#[tokio::test]
async fn cancelled_at_phase_boundary() {
    let mut tag = common::fixtures::sample_tag();
    let token = CancelToken::new();
    let observer = Arc::new(CancelOn {
        trigger: ScanEvent::BlocksRead { done: 43, total: 43 },
        token: token.clone(),
    });
    let scanner =
        Scanner::with_observer(ScanConfig::default(), observer).with_cancel_token(token);

    let outcome = scanner.scan(&mut tag).await;

    assert_eq!(outcome.error(), Some(&Error::Cancelled));
    // bulk read completed, streaming never attempted
    assert_eq!(tag.count_calls(|c| matches!(c, Call::ReadBlocks(_))), 15);
    assert_eq!(
        tag.count_calls(|c| matches!(c, Call::Custom { parameters, .. } if !parameters.is_empty())),
        0
    );
    assert!(tag.is_invalidated());
}

#[tokio::test]
async fn cancelled_scanner_stays_cancelled_until_reset() {
    let mut tag = common::fixtures::sample_tag();
    let scanner = Scanner::new(ScanConfig::default());
    let token = scanner.cancel_token();
    token.cancel();

    assert_eq!(scanner.scan(&mut tag).await.error(), Some(&Error::Cancelled));
    assert_eq!(scanner.scan(&mut tag).await.error(), Some(&Error::Cancelled));
    assert_eq!(tag.count_calls(|c| *c == Call::Connect), 0);

    token.reset();
    assert!(scanner.scan(&mut tag).await.is_success());
}
