use serde_json::Value;

/// Pretty-print the full output envelope (result, warnings, metadata) to
/// stdout. Decimal amounts keep their full precision as strings.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        // Report on stderr so stdout stays parseable
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
