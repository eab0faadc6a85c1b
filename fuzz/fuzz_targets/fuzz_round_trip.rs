#![no_main]

use canonhuff::{compress_with, decompress, CodecConfig, EndMarker};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Limit data size to avoid slowdowns
    let data = if data.len() > 64 * 1024 { &data[..64 * 1024] } else { data };

    for end_marker in [EndMarker::Auto, EndMarker::Always] {
        let config = CodecConfig { end_marker, ..Default::default() };
        let compressed = compress_with(data, &config).expect("compression failed");
        let decompressed = decompress(compressed.as_slice()).expect("decompression failed");
        assert_eq!(decompressed, data, "Round-trip mismatch");
    }
});
