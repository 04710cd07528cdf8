#![no_main]

use colorclock::saver::LaunchMode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Split arbitrary bytes into whitespace-separated arguments the way a
    // command line would arrive, then make sure parsing never panics
    if let Ok(s) = std::str::from_utf8(data) {
        let args: Vec<&str> = s.split_whitespace().collect();
        if let Ok(mode) = LaunchMode::from_args(args.iter().copied()) {
            let _ = mode.to_string();
        }
    }
});
