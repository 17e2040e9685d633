use crate::cli::OutputFormat;
use colored::Colorize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Table column: header and JSON field name.
pub type Column = (&'static str, &'static str);

pub const DOCTOR_COLUMNS: &[Column] = &[
    ("ID", "doctorId"),
    ("Name", "name"),
    ("Specialty", "specialty"),
    ("Facility", "facilityName"),
    ("Type", "facilityType"),
    ("City", "city"),
];

pub const FACILITY_COLUMNS: &[Column] = &[
    ("ID", "id"),
    ("Name", "name"),
    ("Type", "type"),
    ("Street", "street"),
    ("City", "city"),
    ("Wheelchair", "wheelchairAccessible"),
];

pub fn print_value(value: &Value, format: OutputFormat, columns: &[Column]) {
    match format {
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            println!("{rendered}");
        }
        OutputFormat::Table => match value.as_array() {
            Some(rows) if rows.is_empty() => println!("No entries found."),
            Some(rows) => {
                println!("{}", render_table(rows, columns));
                println!("Total: {}", rows.len());
            }
            None => println!("{}", render_record(value)),
        },
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn render_table(rows: &[Value], columns: &[Column]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|(header, _)| header.to_string()));
    for row in rows {
        builder.push_record(columns.iter().map(|(_, field)| cell(row.get(*field))));
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Two-column field/value view of a single object.
pub fn render_record(value: &Value) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field".to_string(), "Value".to_string()]);
    if let Some(fields) = value.as_object() {
        for (key, field) in fields {
            builder.push_record([key.clone(), cell(Some(field))]);
        }
    }
    builder.build().with(Style::rounded()).to_string()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => format!("[{} items]", items.len()),
        Some(other) => other.to_string(),
    }
}
