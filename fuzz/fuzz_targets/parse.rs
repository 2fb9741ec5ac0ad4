#![no_main]

use libfuzzer_sys::fuzz_target;
use muster::frontend::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the lexer
        if let Ok(tokens) = lexer::lex(s) {
            // If lexing succeeds, fuzz the parser
            if let Ok(file) = parser::parse(&tokens) {
                for decl in file.functions() {
                    let _ = decl.receiver_base_type();
                    let _ = decl.params.entries();
                }
            }
        }
    }
});
