use serde_json::Value;
use std::io::{self, Read};

/// Read a JSON mortgage request from stdin when one is piped in.
/// Returns None if stdin is a TTY (interactive) or carries no data, so the
/// caller can fall back to command-line flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    // Interactive session: flags are the only input
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    // An empty pipe (e.g. `< /dev/null`) also means "use flags"
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed)?;
    tracing::debug!(bytes = trimmed.len(), "read request from stdin");
    Ok(Some(value))
}
