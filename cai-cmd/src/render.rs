//! Output rendering: aligned text tables, CSV, or JSON.

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    /// Comma separated values with a header row
    Csv,
    /// Pretty-printed JSON of the underlying rows
    Json,
}

/// A titled table plus the typed rows it was formatted from.
///
/// Text and CSV output use the preformatted `rows`; JSON output serializes
/// `data` so numbers keep full precision.
pub struct View<T: Serialize> {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub data: T,
}

impl<T: Serialize> View<T> {
    pub fn new(title: impl Into<String>, headers: &[&str], data: T) -> Self {
        View {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            data,
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

pub fn emit<T: Serialize, W: Write>(out: &mut W, format: OutputFormat, view: &View<T>) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => write_table(out, view),
        OutputFormat::Csv => write_csv(out, view),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &view.data)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_table<T: Serialize, W: Write>(out: &mut W, view: &View<T>) -> anyhow::Result<()> {
    let mut widths: Vec<usize> = view.headers.iter().map(|h| h.chars().count()).collect();
    for row in &view.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", view.title)?;
    writeln!(out, "{}", line(view.headers.as_slice()))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    if view.rows.is_empty() {
        writeln!(out, "(no rows)")?;
    }
    for row in &view.rows {
        writeln!(out, "{}", line(row.as_slice()))?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_csv<T: Serialize, W: Write>(out: &mut W, view: &View<T>) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(&mut *out);
    wtr.write_record(&view.headers)?;
    for row in &view.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Point {
        name: &'static str,
        value: f64,
    }

    fn sample_view() -> View<Vec<Point>> {
        let data = vec![
            Point { name: "alpha", value: 1.5 },
            Point { name: "b", value: 22.25 },
        ];
        let mut view = View::new("Points", &["Name", "Value"], data);
        view.row(vec!["alpha".to_string(), "1.50".to_string()]);
        view.row(vec!["b".to_string(), "22.25".to_string()]);
        view
    }

    fn rendered(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        emit(&mut buf, format, &sample_view()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_columns_are_aligned() {
        let text = rendered(OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Points");
        assert_eq!(lines[1], "Name   Value");
        assert_eq!(lines[2], "-----  -----");
        assert_eq!(lines[3], "alpha  1.50");
        assert_eq!(lines[4], "b      22.25");
    }

    #[test]
    fn csv_has_header_row() {
        assert_eq!(rendered(OutputFormat::Csv), "Name,Value\nalpha,1.50\nb,22.25\n");
    }

    #[test]
    fn json_uses_typed_data() {
        let value: serde_json::Value = serde_json::from_str(&rendered(OutputFormat::Json)).unwrap();
        assert_eq!(value[1]["name"], "b");
        assert_eq!(value[1]["value"], 22.25);
    }

    #[test]
    fn empty_table_says_so() {
        let view = View::new("Nothing", &["A"], Vec::<Point>::new());
        let mut buf = Vec::new();
        emit(&mut buf, OutputFormat::Table, &view).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("(no rows)"));
    }
}
