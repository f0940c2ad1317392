#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header parsing and 24-bit decode must never panic
    let _ = zenframebmp::bmp::parse_bmp_header(data);
    let _ = zenframebmp::decode_bmp(data, enough::Unstoppable);
});
