#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe, raw parse and full decode must never panic
    let probed = fsbmp::probe(data);
    let decoded = fsbmp::decode(data, enough::Unstoppable);
    if decoded.is_ok() {
        assert!(probed.is_ok(), "decode succeeded where probe failed");
    }
    let _ = fsbmp::DecodeRequest::new(data).decode_raw(enough::Unstoppable);
});
