// output formatting for the logs command - aligned table or json lines

use crate::Error;
use crate::triage::SymptomRecord;

const HEADERS: [&str; 5] = ["id", "timestamp", "department", "risk", "symptom"];

// long symptoms get cut so rows stay on one line
const MAX_WIDTH: usize = 40;

pub struct Output;

impl Output {
    pub fn table(records: &[SymptomRecord]) -> String {
        if records.is_empty() {
            return "no log rows".to_string();
        }

        let rows: Vec<[String; 5]> = records
            .iter()
            .map(|r| {
                [
                    r.id.to_string(),
                    r.timestamp.clone(),
                    r.department.clone(),
                    r.risk.clone(),
                    truncate(&r.symptom),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = Vec::with_capacity(rows.len() + 2);
        out.push(format_row(&HEADERS.map(str::to_string), &widths));

        let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push(sep.join("-+-"));

        for row in &rows {
            out.push(format_row(row, &widths));
        }

        out.join("\n")
    }

    // one object per line for scripts
    pub fn json_lines(records: &[SymptomRecord]) -> Result<String, Error> {
        let lines = records
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }
}

fn format_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:w$}"))
        .collect();
    padded.join(" | ").trim_end().to_string()
}

fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_WIDTH {
        let head: String = s.chars().take(MAX_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}
