#[path = "../common/mod.rs"]
mod common;

use librenfc::prelude::*;
use librenfc::transport::mock::Call;

#[tokio::test]
async fn end_to_end_libre2_scan() {
    common::init_logger();
    let mut tag = common::fixtures::sample_tag();
    let rec = common::Recorder::new();
    let scanner = Scanner::with_observer(ScanConfig::default(), rec.clone());

    let outcome = scanner.scan(&mut tag).await;

    let result = match outcome {
        SessionOutcome::Success(result) => result,
        SessionOutcome::Failure(e) => panic!("scan failed: {}", e),
    };
    assert_eq!(
        result.sensor_uid.as_bytes(),
        &common::fixtures::sample_sensor_uid_bytes()
    );
    assert_eq!(result.tag_uid.as_bytes(), &common::fixtures::sample_uid_bytes());
    assert_eq!(result.memory.len(), 344);
    assert_eq!(result.memory.block_count(), 43);
    assert!(result.memory.as_bytes().iter().all(|&b| b == 0));
    assert_eq!(result.system_info.total_blocks, 43);
    assert_eq!(result.sensor_type, SensorType::Libre2);
    assert_eq!(result.serial_number, "30D20A1H710");
    assert!(result.streaming_enabled);
    assert_eq!(
        result.streaming_address_string().as_deref(),
        Some("FF:EE:DD:CC:BB:AA")
    );

    assert!(tag.calls.contains(&Call::Custom {
        code: 0xA1,
        parameters: common::fixtures::sample_enable_streaming_parameters(),
    }));
    assert_eq!(tag.calls.last(), Some(&Call::Invalidate(None)));
    assert_eq!(
        rec.events()
            .iter()
            .filter(|e| matches!(e, ScanEvent::BlocksRead { .. }))
            .count(),
        15
    );
}

#[tokio::test]
async fn end_to_end_preserves_block_order() {
    let mut tag = librenfc::test_support::libre2_mock_with_pattern();
    let scanner = Scanner::new(ScanConfig::default());

    let result = scanner.scan(&mut tag).await.into_result().unwrap();

    assert_eq!(result.memory.as_bytes(), tag.fram());
    assert_eq!(result.memory.block(42), Some(&tag.fram()[336..344]));
}
