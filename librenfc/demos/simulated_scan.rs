// Scan a simulated Libre 2 tag and print what was read.

// Run with `RUST_LOG=debug cargo run --example simulated_scan` to see the
// protocol traffic, block dumps and phase changes.

use anyhow::Context;
use librenfc::prelude::*;
use librenfc::test_support::libre2_mock_with_pattern;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut tag = libre2_mock_with_pattern();
    // first two connection attempts fail like a sensor held too far away
    tag.connect_failures = 2;
    tag.verify_streaming_nonce = true;

    let config = ScanConfig::default()
        .with_retry_backoff(ms(50))
        .with_dump_raw_memory(true);
    let scanner = Scanner::new(config);

    println!("Scanning simulated tag {}...", bytes_to_hex_spaced(tag.tag_uid()));
    let result = scanner
        .scan(&mut tag)
        .await
        .into_result()
        .context("scan failed")?;

    println!("Sensor type:    {}", result.sensor_type);
    println!("Serial number:  {}", result.serial_number);
    println!("Sensor UID:     {}", result.sensor_uid.to_hex());
    println!("Patch info:     {}", result.patch_info.to_hex());
    println!("FRAM:           {} bytes", result.memory.len());
    match result.streaming_address_string() {
        Some(address) => println!("BLE streaming:  enabled, MAC {}", address),
        None => println!("BLE streaming:  not enabled"),
    }
    println!("{}", hex_dump(&result.memory.as_bytes()[..48], 0xF860));

    // Write a byte into config RAM and read it back through the backdoor.
    write_raw(&mut tag, 0x1A20, &[0x42]).await?;
    let back = read_raw(&mut tag, 0x1A20, 1).await?;
    println!("Config RAM 0x1a20 after write: {:02x}", back[0]);

    Ok(())
}
