use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Scalar result fields come out as field,value rows; each array-valued
/// field (schedule, yearly snapshots, slab breakdown) follows as its own
/// block with a header row. Rows vary in width, so the writer is flexible.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                if !val.is_array() {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
            for (key, val) in map {
                if let Value::Array(rows) = val {
                    if !rows.is_empty() {
                        let _ = wtr.write_record([key.as_str()]);
                        write_rows_csv(&mut wtr, rows);
                    }
                }
            }
        }
        Value::Array(rows) => {
            write_rows_csv(&mut wtr, rows);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            let _ = wtr.write_record([&format_csv_value(row)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(fields) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| fields.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
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
