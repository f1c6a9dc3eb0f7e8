use mortgage_calc_core::format::{format_currency, format_prepayment_cell};
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{decimal_field, schedule_rows};

const SCHEDULE_HEADERS: [&str; 6] = [
    "Month",
    "Payment",
    "Principal",
    "Interest",
    "Prepayment",
    "Balance",
];

/// Format output as tables: the summary first, then the schedule if present.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => println!("{}", value),
    }

    if let Some(rows) = schedule_rows(value) {
        print_schedule_table(rows);
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            match (key.as_str(), val) {
                ("schedule", _) => continue,
                (_, Value::Object(inner)) => {
                    for (sub_key, sub_val) in inner {
                        builder.push_record([format!("{key}.{sub_key}"), format_value(sub_val)]);
                    }
                }
                _ => {
                    builder.push_record([key.clone(), format_value(val)]);
                }
            }
        }
        println!("{}", Table::from(builder));
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_schedule_table(rows: &[Value]) {
    if rows.is_empty() {
        println!("\n(empty schedule)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_HEADERS);
    for row in rows {
        builder.push_record([
            format_value(row.get("month").unwrap_or(&Value::Null)),
            format_currency(decimal_field(row, "payment"), true),
            format_currency(decimal_field(row, "principal"), true),
            format_currency(decimal_field(row, "interest"), true),
            format_prepayment_cell(decimal_field(row, "prepayment")),
            format_currency(decimal_field(row, "balance"), true),
        ]);
    }
    println!("\n{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
