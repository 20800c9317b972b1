#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlscript_rs::parser;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, handling invalid UTF-8 gracefully
    let input = String::from_utf8_lossy(data);

    // Fuzz the main parser function
    // The parser should never panic and always return a proper Result
    let result = parser::parse(&input);

    // We don't care if parsing succeeds or fails, just that it doesn't panic
    // If it succeeds, verify the result is well-formed
    if let Ok(ref script) = result {
        for before in &script.befores {
            assert!(before.line_num > 0, "Invalid line number");
        }
        for case in &script.cases {
            assert!(case.line_num > 0, "Invalid line number");
            for stand in &case.stands {
                assert!(stand.line_num > 0, "Invalid line number");
            }
        }
    }

    // Test that the parser is deterministic - same input should produce same result
    let result2 = parser::parse(&input);
    match (result.is_ok(), result2.is_ok()) {
        (true, true) => {
            if let (Ok(ref script1), Ok(ref script2)) = (&result, &result2) {
                assert_eq!(script1, script2, "Parser is not deterministic");
            }
        }
        (false, false) => {
            // Both failed - this is fine, errors don't need to be identical
        }
        _ => {
            panic!("Parser is not deterministic - one call succeeded, other failed");
        }
    }
});
