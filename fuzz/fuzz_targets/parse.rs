#![no_main]

use balsa_syntax::{EntryContext, ParserConfig, Parser, lexer::TokenReader};
use libfuzzer_sys::fuzz_target;

const ENTRIES: [EntryContext; 4] = [
    EntryContext::CompilationUnit,
    EntryContext::TopLevelNode,
    EntryContext::Statement,
    EntryContext::Expression,
];

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    // A shallow bound keeps deep-nesting inputs on the recovery path.
    let config = ParserConfig::new().with_max_nesting_depth(64);
    for entry in ENTRIES {
        let tree = Parser::with_config(TokenReader::new(source), config.clone()).parse_entry(entry);
        for token in tree.source_tokens() {
            assert!(token.span.end <= source.len(), "token past end of input: {token:?}");
        }
    }
});
