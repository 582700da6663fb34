//! Fuzz target for autodetected image decoding.
//!
//! This fuzzer feeds arbitrary text to the front-end in auto mode, so both
//! the YAML and raw grid interpretations are exercised, checking for panics
//! or hangs.

#![no_main]

use asciimage::ir::{DocumentMetadata, InputFormat, Source};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = asciimage::parse(
        &Source::from(text),
        InputFormat::Auto,
        &DocumentMetadata::default(),
    );
});
