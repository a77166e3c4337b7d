#![no_main]
use libfuzzer_sys::fuzz_target;
use fsbmp::*;

fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    for target in TargetFormat::ALL {
        let encoded = encode(&decoded.image, target, enough::Unstoppable)
            .expect("encoding a decoded image must succeed");
        let Ok(again) = decode(&encoded, enough::Unstoppable) else {
            panic!("re-encoded {target:?} failed to decode");
        };
        assert_eq!(again.width(), decoded.width());
        assert_eq!(again.source_format, PixelFormat::from(target));

        // Lossless targets reproduce the color channels exactly
        if target != TargetFormat::Dxt3 {
            let same = decoded
                .pixels()
                .chunks_exact(4)
                .zip(again.pixels().chunks_exact(4))
                .all(|(a, b)| a[..3] == b[..3]);
            assert!(same, "{target:?} roundtrip pixel mismatch");
        }
    }
});
