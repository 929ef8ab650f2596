#[path = "../common/mod.rs"]
mod common;

use librenfc::session::{ScanConfig, ScanEvent, Scanner};
use librenfc::transport::mock::Call;
use librenfc::TransportError;

fn quick_config() -> ScanConfig {
    ScanConfig::default().with_retry_backoff(std::time::Duration::ZERO)
}

#[tokio::test]
async fn streaming_failure_keeps_memory() {
    common::init_logger();
    let mut tag = common::fixtures::sample_tag();
    tag.streaming_failure = true;
    let rec = common::Recorder::new();
    let scanner = Scanner::with_observer(quick_config(), rec.clone());

    let result = scanner.scan(&mut tag).await.into_result().unwrap();

    assert!(!result.streaming_enabled);
    assert_eq!(result.streaming_address, None);
    assert_eq!(result.memory.len(), 344);
    assert!(rec
        .events()
        .contains(&ScanEvent::StreamingEnabled { success: false }));
    assert_eq!(tag.calls.last(), Some(&Call::Invalidate(None)));
}

#[tokio::test]
async fn streaming_enabled_after_best_effort_patch_info() {
    let mut tag = common::fixtures::sample_tag();
    tag.verify_streaming_nonce = true;
    tag.push_patch_info(Ok(common::fixtures::sample_patch_info()));
    for _ in 0..9 {
        tag.push_patch_info(Err(TransportError::Timeout));
    }
    let scanner = Scanner::new(quick_config());

    let result = scanner.scan(&mut tag).await.into_result().unwrap();

    assert!(result.streaming_enabled);
}

#[tokio::test]
async fn custom_unlock_code_is_sent_little_endian() {
    let mut tag = common::fixtures::sample_tag();
    tag.verify_streaming_nonce = true;
    let scanner = Scanner::new(quick_config().with_unlock_code(0xdeadbeef));

    let result = scanner.scan(&mut tag).await.into_result().unwrap();

    assert!(result.streaming_enabled);
    let sent = tag
        .calls
        .iter()
        .find_map(|c| match c {
            Call::Custom { code: 0xA1, parameters } if parameters.first() == Some(&0x1e) => {
                Some(parameters.clone())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(&sent[1..5], &0xdeadbeef_u32.to_le_bytes());
}

#[tokio::test]
async fn tampered_patch_info_breaks_nonce() {
    let mut tag = common::fixtures::sample_tag();
    tag.verify_streaming_nonce = true;
    // the sensor reports one patch info but verifies against another
    tag.push_patch_info(Ok(hex::decode("9d0830011234").unwrap()));
    tag.push_patch_info(Ok(hex::decode("9d0830011234").unwrap()));
    let scanner = Scanner::new(quick_config());

    let result = scanner.scan(&mut tag).await.into_result().unwrap();

    assert!(!result.streaming_enabled);
}
