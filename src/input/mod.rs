pub mod columns;
pub mod table;

use crate::model::faults::SoftFault;
use table::{MetricTable, parse_table};

pub const KINEMATICS: &str = "kinematics";
pub const ENERGY: &str = "energy";

/// The two parsed payloads of one capture.
#[derive(Debug, Clone, Default)]
pub struct CaptureTables {
    pub kinematics: MetricTable,
    pub energy: MetricTable,
}

pub fn parse_capture(kinematics_csv: &str, energy_csv: &str) -> CaptureTables {
    let kinematics = parse_table(kinematics_csv);
    let energy = parse_table(energy_csv);
    tracing::info!(
        kinematics_rows = kinematics.n_rows(),
        kinematics_columns = kinematics.headers().len(),
        energy_rows = energy.n_rows(),
        energy_columns = energy.headers().len(),
        "parsed capture payloads"
    );
    CaptureTables { kinematics, energy }
}

/// One `MalformedValue` fault per column that had cells coerced to `0.0`.
pub fn coercion_faults(table: &MetricTable, name: &'static str) -> Vec<SoftFault> {
    table
        .coerced_cells()
        .iter()
        .map(|(column, cells)| SoftFault::MalformedValue {
            table: name,
            column: column.clone(),
            cells: *cells,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
