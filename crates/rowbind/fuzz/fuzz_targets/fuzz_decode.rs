//! Fuzz target for CSV decoding.
//!
//! This fuzzer tests that decoding:
//! 1. Never panics on malformed input
//! 2. Handles every policy flag combination
//! 3. Doesn't allocate unbounded memory

#![no_main]

use libfuzzer_sys::fuzz_target;
use rowbind::{DecodeOptions, Decoder, FieldCount, ReaderOptions};

rowbind::record! {
    #[derive(Debug, Default)]
    pub struct Target {
        pub name: String => ["n"],
        pub small: i8 => ["s"],
        pub big: u64 => ["b"],
        pub ratio: f32 => ["r"],
        pub flag: bool => ["f"],
        pub at: chrono::DateTime<chrono::FixedOffset> => ["t"],
    }
}

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 || data.is_empty() {
        return;
    }

    let flags = data[0];
    let Ok(text) = std::str::from_utf8(&data[1..]) else {
        return;
    };

    let mut options = DecodeOptions::new()
        .with_ignore_unknown_fields(flags & 1 != 0)
        .with_ignore_field_type_errors(flags & 2 != 0)
        .with_reader(ReaderOptions {
            fields_per_record: if flags & 4 != 0 {
                FieldCount::Any
            } else {
                FieldCount::Header
            },
            trim_leading_space: flags & 8 != 0,
            ..ReaderOptions::default()
        });
    if flags & 16 != 0 {
        options = options.with_aliases();
    }

    if let Ok(decoder) = Decoder::<Target>::with_options(&options) {
        let _ = decoder.decode_str(text);
    }
});
