use std::collections::HashMap;

use crate::input::columns::{MOVEMENT_ID, SignalDef, resolve_column};

/// Column-major frame table parsed from one CSV payload.
///
/// Every column has exactly `n_rows` values. Movement ids, when present, are
/// kept beside the numeric data so the table can be split into swings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    headers: Vec<String>,
    data: Vec<Vec<f64>>,
    n_rows: usize,
    movement_ids: Option<Vec<String>>,
    coerced: Vec<(String, usize)>,
}

impl MetricTable {
    pub fn from_columns(columns: Vec<(&str, Vec<f64>)>) -> Self {
        let n_rows = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let mut headers = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        for (name, mut values) in columns {
            values.resize(n_rows, 0.0);
            headers.push(normalize_header(name, headers.len()));
            data.push(values);
        }
        Self {
            headers,
            data,
            n_rows,
            movement_ids: None,
            coerced: Vec::new(),
        }
    }

    pub fn with_movement_ids(mut self, ids: Vec<String>) -> Self {
        let mut ids: Vec<String> = ids.iter().map(|s| normalize_id(s)).collect();
        ids.resize(self.n_rows, String::new());
        self.movement_ids = Some(ids);
        self
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn movement_ids(&self) -> Option<&[String]> {
        self.movement_ids.as_deref()
    }

    /// Columns in which at least one cell was coerced to `0.0`, with counts.
    pub fn coerced_cells(&self) -> &[(String, usize)] {
        &self.coerced
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|idx| self.data[idx].as_slice())
    }

    pub fn resolve(&self, signal: &SignalDef) -> Option<&[f64]> {
        resolve_column(&self.headers, signal).map(|idx| self.data[idx].as_slice())
    }

    /// Applies `f` to every column whose header satisfies `select`.
    pub fn map_columns<S, F>(&mut self, mut select: S, mut f: F)
    where
        S: FnMut(&str, &[f64]) -> bool,
        F: FnMut(&str, &mut Vec<f64>),
    {
        for (header, values) in self.headers.iter().zip(self.data.iter_mut()) {
            if select(header.as_str(), values.as_slice()) {
                f(header.as_str(), values);
            }
        }
    }

    fn select_rows(&self, rows: &[usize]) -> MetricTable {
        let data = self
            .data
            .iter()
            .map(|col| rows.iter().map(|&r| col[r]).collect())
            .collect();
        MetricTable {
            headers: self.headers.clone(),
            data,
            n_rows: rows.len(),
            movement_ids: None,
            coerced: Vec::new(),
        }
    }

    /// Splits the table by movement id, groups in order of first appearance,
    /// rows in original order. `None` when the table carries no ids.
    pub fn partition(&self) -> Option<Vec<(String, MetricTable)>> {
        let ids = self.movement_ids.as_ref()?;
        let mut order: Vec<(String, Vec<usize>)> = Vec::new();
        let mut slot_by_id: HashMap<&str, usize> = HashMap::new();
        for (row, id) in ids.iter().enumerate() {
            match slot_by_id.get(id.as_str()) {
                Some(&slot) => order[slot].1.push(row),
                None => {
                    slot_by_id.insert(id.as_str(), order.len());
                    order.push((id.clone(), vec![row]));
                }
            }
        }
        Some(
            order
                .into_iter()
                .map(|(id, rows)| {
                    let table = self.select_rows(&rows);
                    (id, table)
                })
                .collect(),
        )
    }

    /// Same data without movement ids.
    pub fn ungrouped(&self) -> MetricTable {
        let mut out = self.clone();
        out.movement_ids = None;
        out
    }
}

/// Parses one delimited payload. Never fails: unreadable rows are skipped and
/// non-numeric cells become `0.0`.
pub fn parse_table(text: &str) -> MetricTable {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let raw_headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(err) => {
            tracing::warn!(error = %err, "unreadable CSV header; treating payload as empty");
            return MetricTable::default();
        }
    };
    let all_headers: Vec<String> = raw_headers
        .iter()
        .enumerate()
        .map(|(i, h)| normalize_header(h, i))
        .collect();
    let id_col = resolve_column(&all_headers, &MOVEMENT_ID);

    let mut headers = Vec::with_capacity(all_headers.len());
    let mut sources = Vec::with_capacity(all_headers.len());
    for (idx, header) in all_headers.iter().enumerate() {
        if Some(idx) != id_col {
            headers.push(header.clone());
            sources.push(idx);
        }
    }

    let mut data: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut coerced = vec![0usize; headers.len()];
    let mut ids = Vec::new();
    let mut n_rows = 0usize;

    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(row = line + 1, error = %err, "skipping unreadable CSV row");
                continue;
            }
        };
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        for (col, &src) in sources.iter().enumerate() {
            let cell = record.get(src).unwrap_or("");
            match parse_cell(cell) {
                Some(v) => data[col].push(v),
                None => {
                    coerced[col] += 1;
                    data[col].push(0.0);
                }
            }
        }
        if let Some(idx) = id_col {
            ids.push(normalize_id(record.get(idx).unwrap_or("")));
        }
        n_rows += 1;
    }

    let coerced = headers
        .iter()
        .zip(coerced)
        .filter(|(_, n)| *n > 0)
        .map(|(h, n)| (h.clone(), n))
        .collect();

    tracing::debug!(
        columns = headers.len(),
        rows = n_rows,
        grouped = id_col.is_some(),
        "parsed CSV payload"
    );

    MetricTable {
        headers,
        data,
        n_rows,
        movement_ids: id_col.map(|_| ids),
        coerced,
    }
}

fn parse_cell(cell: &str) -> Option<f64> {
    let v = cell.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn normalize_header(raw: &str, idx: usize) -> String {
    let h = raw.trim().trim_start_matches('\u{feff}').to_lowercase();
    if h.is_empty() {
        format!("column_{idx}")
    } else {
        h
    }
}

/// `1`, `1.0` and ` 1 ` name the same movement.
fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
