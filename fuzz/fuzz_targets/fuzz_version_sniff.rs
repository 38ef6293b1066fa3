#![no_main]

use arbitrary::Arbitrary;
use hearth_state::sniff_version;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    version: u32,
    tail: &'a [u8],
    raw: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let _ = sniff_version(input.raw);

    let mut bytes = vec![0x08];
    prost::encoding::encode_varint(u64::from(input.version), &mut bytes);
    bytes.extend_from_slice(input.tail);
    assert_eq!(sniff_version(&bytes).map(|v| v.0).ok(), Some(input.version));
});
