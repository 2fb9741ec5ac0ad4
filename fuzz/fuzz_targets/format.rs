#![no_main]

use libfuzzer_sys::fuzz_target;
use muster::format::format_source;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Whatever formats once must be a fixed point.
        if let Ok(formatted) = format_source(s) {
            assert_eq!(format_source(&formatted).ok().as_deref(), Some(formatted.as_str()));
        }
    }
});
