#[path = "../common/mod.rs"]
mod common;

use librenfc::memory::write_raw;
use librenfc::transport::mock::Call;
use librenfc::{Error, TransportError};

fn backdoor(code: u8) -> Call {
    Call::Custom {
        code,
        parameters: b"deadbeef".to_vec(),
    }
}

#[tokio::test]
async fn fram_write_failure_locks_and_stops() {
    common::init_logger();
    let mut tag = common::fixtures::sample_tag();
    tag.fail_write_at = Some(0);

    let err = write_raw(&mut tag, 0xF860, &[0xAB; 24]).await.unwrap_err();

    assert_eq!(err, Error::Transport(TransportError::TagLost));
    assert_eq!(tag.calls.first(), Some(&backdoor(0xA4)));
    assert_eq!(tag.calls.last(), Some(&backdoor(0xA2)));
    assert_eq!(tag.count_calls(|c| matches!(c, Call::WriteBlocks(_))), 1);
    assert!(!tag.unlocked);
    assert!(tag.fram().iter().all(|&b| b == 0));
}

#[tokio::test]
async fn sequence_unlock_read_write_lock() {
    let mut tag = common::fixtures::sample_tag();

    write_raw(&mut tag, 0x1A08, &[1, 2, 3, 4, 5, 6, 7, 8])
        .await
        .unwrap();

    assert_eq!(
        tag.calls,
        vec![
            backdoor(0xA4),
            Call::Custom {
                code: 0xB3,
                parameters: vec![0x08, 0x1A, 4],
            },
            Call::WriteBlock(0x341),
            backdoor(0xA2),
        ]
    );
}

#[tokio::test]
async fn write_past_end_of_memory_is_rejected() {
    let mut tag = common::fixtures::sample_tag();

    let err = write_raw(&mut tag, 0xFFFC, &[0; 8]).await.unwrap_err();

    assert!(matches!(err, Error::AddressOutOfRange { address: 0xFFFC, length: 8 }));
    assert!(tag.calls.is_empty());
}
