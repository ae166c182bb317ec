//! Input table loading.
//!
//! Reads the two delimited input tables into typed records. Base paths are
//! explicit parameters; nothing here touches the process working directory.
//! Any I/O or parse failure aborts the run, there is no partial processing.

use crate::error::{EvPolicyError, Result};
use crate::records::{AssumptionRecord, TargetRecord};
use std::path::Path;

/// Read the EV adoption-target table.
///
/// The header row is required; columns are matched by name so extra columns
/// pass through unused.
///
/// # Errors
///
/// Returns [`EvPolicyError::Io`] if the file cannot be opened and
/// [`EvPolicyError::Parse`] if any record fails to deserialize.
pub fn load_targets<P: AsRef<Path>>(path: P) -> Result<Vec<TargetRecord>> {
    let records = read_table(path.as_ref())?;
    log::info!(
        "loaded {} target rows from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Read the per-technology travel and load-factor assumptions table.
///
/// # Errors
///
/// Returns [`EvPolicyError::Io`] if the file cannot be opened and
/// [`EvPolicyError::Parse`] if any record fails to deserialize.
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<Vec<AssumptionRecord>> {
    let records = read_table(path.as_ref())?;
    log::info!(
        "loaded {} assumption rows from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Shared reader: open, deserialize every record, attach the filename to
/// whichever error surfaces first.
fn read_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let filename = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| add_context(e.into(), &filename))?;

    reader
        .deserialize()
        .map(|record| record.map_err(|e| add_context(e.into(), &filename)))
        .collect()
}

/// Fold the source filename into an error message so a failed run names the
/// offending table.
fn add_context(err: EvPolicyError, filename: &str) -> EvPolicyError {
    match err {
        EvPolicyError::Parse(msg) => EvPolicyError::Parse(format!("{filename}: {msg}")),
        EvPolicyError::Io(e) => EvPolicyError::Io(std::io::Error::new(
            e.kind(),
            format!("{filename}: {e}"),
        )),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_load_targets_reads_rows() {
        let file = write_temp(
            "region,year,supplysector,tranSubsector,EV_Sale_Target(%)\n\
             USA,2030,trn_pass_road_LDV_4W,Car,0.3\n\
             EU-15,2035,trn_freight_road,Truck,0.2\n",
        );

        let records = load_targets(file.path()).expect("targets should load");
        assert_eq!(records.len(), 2, "should load both data rows");
        assert_eq!(records[1].region, "EU-15");
        assert_eq!(records[1].year, 2035);
    }

    #[test]
    fn test_load_assumptions_reads_rows() {
        let file = write_temp(
            "supplysector,tranSubsector,stub.technology,year,\
             assumptions on annual travel per vehicle,load factors\n\
             trn_pass_road_LDV_4W,Car,BEV,2030,15000,1.5\n\
             trn_pass_road_LDV_4W,Car,Liquids,2030,15000,1.5\n",
        );

        let records = load_assumptions(file.path()).expect("assumptions should load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stub_technology, "BEV");
        assert_eq!(records[1].stub_technology, "Liquids");
    }

    #[test]
    fn test_load_targets_missing_file_fails() {
        let err = load_targets("/nonexistent/EVTarget.csv").unwrap_err();
        let msg = err.to_string();
        assert!(
            msg.contains("EVTarget.csv"),
            "error should name the missing file: {msg}"
        );
    }

    #[test]
    fn test_load_targets_bad_number_fails() {
        let file = write_temp(
            "region,year,supplysector,tranSubsector,EV_Sale_Target(%)\n\
             USA,not_a_year,trn_pass_road,Car,0.3\n",
        );

        let result = load_targets(file.path());
        assert!(result.is_err(), "non-numeric year should fail the load");
    }

    #[test]
    fn test_load_targets_missing_column_fails() {
        let file = write_temp(
            "region,year,supplysector\n\
             USA,2030,trn_pass_road\n",
        );

        let result = load_targets(file.path());
        assert!(result.is_err(), "missing columns should fail the load");
    }
}
