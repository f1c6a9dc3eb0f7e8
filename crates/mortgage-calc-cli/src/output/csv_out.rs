use mortgage_calc_core::format::{format_currency, format_prepayment_cell};
use serde_json::Value;
use std::io::{self, Write};

use super::{decimal_field, schedule_rows};

const SCHEDULE_HEADERS: [&str; 6] = [
    "month",
    "payment",
    "principal",
    "interest",
    "prepayment",
    "balance",
];

/// Write output as CSV to stdout.
///
/// Outputs with a schedule are exported row by row (`;`-delimited, grouped
/// amounts). Anything else becomes a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let result = match schedule_rows(value) {
        Some(rows) => write_schedule_csv(stdout.lock(), rows),
        None => write_fields_csv(stdout.lock(), value),
    };
    if let Err(e) = result {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_schedule_csv<W: Write>(out: W, rows: &[Value]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(out);
    wtr.write_record(SCHEDULE_HEADERS)?;
    for row in rows {
        wtr.write_record([
            format_csv_value(row.get("month").unwrap_or(&Value::Null)),
            format_currency(decimal_field(row, "payment"), true),
            format_currency(decimal_field(row, "principal"), true),
            format_currency(decimal_field(row, "interest"), true),
            format_prepayment_cell(decimal_field(row, "prepayment")),
            format_currency(decimal_field(row, "balance"), true),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_fields_csv<W: Write>(out: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);
    let fields = value
        .get("result")
        .and_then(Value::as_object)
        .or_else(|| value.as_object());

    match fields {
        Some(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.as_str(), &format_csv_value(val)])?;
            }
        }
        None => wtr.write_record([&format_csv_value(value)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
