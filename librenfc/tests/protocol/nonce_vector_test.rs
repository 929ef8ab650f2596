use librenfc::protocol::obfuscate;
use librenfc::types::SensorUid;

fn uid(s: &str) -> SensorUid {
    SensorUid::try_from(hex::decode(s).unwrap().as_slice()).unwrap()
}

#[test]
fn known_vectors() {
    let cases = [
        ("0807060504030201", 0x1e, 0x002a, "be733b10"),
        ("0807060504030201", 0x1b, 0x1b6a, "88f0d354"),
        ("0000000000000000", 0x00, 0x0000, "ccafc710"),
        ("79c26a030000a407", 0x1e, 0x1234, "4c3263e7"),
    ];
    for (u, x, y, expected) in cases {
        assert_eq!(
            hex::encode(obfuscate(&uid(u), x, y)),
            expected,
            "uid {} x {:#x} y {:#x}",
            u,
            x,
            y
        );
    }
}

#[test]
fn depends_on_uid() {
    let a = obfuscate(&uid("0807060504030201"), 0x1e, 0x2a);
    let b = obfuscate(&uid("0907060504030201"), 0x1e, 0x2a);
    assert_ne!(a, b);
}
