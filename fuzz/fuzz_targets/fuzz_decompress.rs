#![no_main]

use canonhuff::decompress;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding may fail on arbitrary input - that's OK
    // We're looking for panics/crashes, not errors
    let _ = decompress(data);
});
