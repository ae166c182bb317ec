//! CSV rendering for the two output tables.

use crate::error::{EvPolicyError, Result};
use crate::records::{CoefTableRow, ResTableRow};

/// Serialize output table 1 (`StubTranTechCoef`) to CSV text.
///
/// Headers come from the row type's serde renames; a `None` coefficient
/// becomes an empty field.
///
/// # Errors
///
/// Returns [`EvPolicyError::Parse`] if a row fails to serialize.
pub fn coef_table_to_csv(rows: &[CoefTableRow]) -> Result<String> {
    to_csv(rows)
}

/// Serialize output table 2 (`StubTranTechRES`) to CSV text.
///
/// # Errors
///
/// Returns [`EvPolicyError::Parse`] if a row fails to serialize.
pub fn res_table_to_csv(rows: &[ResTableRow]) -> Result<String> {
    to_csv(rows)
}

fn to_csv<T: serde::Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| EvPolicyError::Parse(format!("flushing CSV buffer: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| EvPolicyError::Parse(format!("CSV output is not UTF-8: {e}")))
}
