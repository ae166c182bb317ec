//! Coefficient and resource-output calculation.
//!
//! Only the BEV technology interacts with adoption targets: assumptions are
//! restricted to `stub.technology == "BEV"` and inner-joined with target
//! rows on (supplysector, tranSubsector, year). Rows without a match on
//! either side are dropped by design, not by accident.

use crate::classify::derive_energy_input_name;
use crate::error::{EvPolicyError, Result};
use crate::records::{AssumptionRecord, CoefficientRow, ResourceRow, TargetRecord};
use std::collections::HashMap;

/// Technology code carrying coefficient and resource calculations.
pub const BEV_TECHNOLOGY: &str = "BEV";

/// Fixed market scaling constant attached to every resource row.
pub const P_MULTIPLIER: f64 = 1_000_000_000.0;

/// Unit scale folded into both computed values.
const MILLION: f64 = 1_000_000.0;

/// Join key on the assumptions side: (supplysector, tranSubsector, year).
type JoinKey<'a> = (&'a str, &'a str, i32);

/// Index BEV assumption rows by join key, preserving input order within a
/// key so duplicate assumption rows join the way the input stated them.
fn bev_index(assumptions: &[AssumptionRecord]) -> HashMap<JoinKey<'_>, Vec<&AssumptionRecord>> {
    let mut index: HashMap<JoinKey<'_>, Vec<&AssumptionRecord>> = HashMap::new();
    for record in assumptions
        .iter()
        .filter(|a| a.stub_technology == BEV_TECHNOLOGY)
    {
        index
            .entry((
                record.supplysector.as_str(),
                record.tran_subsector.as_str(),
                record.year,
            ))
            .or_default()
            .push(record);
    }
    index
}

/// Reject travel values that would make the reciprocal undefined or
/// non-finite. Undefined coefficients are a data defect, not a value to
/// propagate.
fn checked_reciprocal_travel(record: &AssumptionRecord) -> Result<f64> {
    let travel = record.annual_travel_per_vehicle;
    if travel == 0.0 || !travel.is_finite() {
        return Err(EvPolicyError::InvalidValue(format!(
            "annual travel per vehicle is {travel} for {}/{} in {}",
            record.supplysector, record.tran_subsector, record.year
        )));
    }
    Ok(1.0 / travel)
}

/// Compute the fuel-coefficient rows from the BEV target join.
///
/// For each target row matching a BEV assumption on
/// (supplysector, tranSubsector, year):
/// `coefficient = (1 / annual_travel_per_vehicle) * sale_target * 1e6`.
///
/// # Errors
///
/// - [`EvPolicyError::NoData`] when the join yields zero rows.
/// - [`EvPolicyError::InvalidValue`] when an annual-travel value is zero or
///   non-finite.
/// - [`EvPolicyError::InvalidFormat`] when a joined supplysector matches
///   neither recognized transport prefix.
pub fn coefficient_rows(
    targets: &[TargetRecord],
    assumptions: &[AssumptionRecord],
) -> Result<Vec<CoefficientRow>> {
    let index = bev_index(assumptions);
    let mut rows = Vec::new();

    for target in targets {
        let key = (
            target.supplysector.as_str(),
            target.tran_subsector.as_str(),
            target.year,
        );
        let Some(matches) = index.get(&key) else {
            continue;
        };
        for assumption in matches {
            let per_vehicle = checked_reciprocal_travel(assumption)?;
            rows.push(CoefficientRow {
                region: target.region.clone(),
                year: target.year,
                supplysector: target.supplysector.clone(),
                tran_subsector: target.tran_subsector.clone(),
                coefficient: per_vehicle * target.sale_target_percent * MILLION,
                energy_input: derive_energy_input_name(&target.supplysector, target.year)?,
            });
        }
    }

    if rows.is_empty() {
        return Err(EvPolicyError::NoData(
            "BEV target join produced zero coefficient rows".to_string(),
        ));
    }
    log::debug!("computed {} coefficient rows", rows.len());
    Ok(rows)
}

/// Compute the resource-output rows from the same BEV target join.
///
/// `output_ratio = (1 / annual_travel_per_vehicle) / load_factor * 1e6 / 1e9`
/// with the fixed [`P_MULTIPLIER`] constant attached to every row.
///
/// # Errors
///
/// Same taxonomy as [`coefficient_rows`]; additionally a zero or non-finite
/// load factor is an [`EvPolicyError::InvalidValue`].
pub fn resource_rows(
    targets: &[TargetRecord],
    assumptions: &[AssumptionRecord],
) -> Result<Vec<ResourceRow>> {
    let index = bev_index(assumptions);
    let mut rows = Vec::new();

    for target in targets {
        let key = (
            target.supplysector.as_str(),
            target.tran_subsector.as_str(),
            target.year,
        );
        let Some(matches) = index.get(&key) else {
            continue;
        };
        for assumption in matches {
            let per_vehicle = checked_reciprocal_travel(assumption)?;
            let load_factor = assumption.load_factor;
            if load_factor == 0.0 || !load_factor.is_finite() {
                return Err(EvPolicyError::InvalidValue(format!(
                    "load factor is {load_factor} for {}/{} in {}",
                    assumption.supplysector, assumption.tran_subsector, assumption.year
                )));
            }
            rows.push(ResourceRow {
                region: target.region.clone(),
                year: target.year,
                supplysector: target.supplysector.clone(),
                tran_subsector: target.tran_subsector.clone(),
                output_ratio: per_vehicle / load_factor * MILLION / P_MULTIPLIER,
                p_multiplier: P_MULTIPLIER,
                secondary_output: derive_energy_input_name(&target.supplysector, target.year)?,
            });
        }
    }

    if rows.is_empty() {
        return Err(EvPolicyError::NoData(
            "BEV target join produced zero resource rows".to_string(),
        ));
    }
    log::debug!("computed {} resource rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(region: &str, year: i32, sector: &str, subsector: &str, pct: f64) -> TargetRecord {
        TargetRecord {
            region: region.to_string(),
            year,
            supplysector: sector.to_string(),
            tran_subsector: subsector.to_string(),
            sale_target_percent: pct,
        }
    }

    fn assumption(
        sector: &str,
        subsector: &str,
        tech: &str,
        year: i32,
        travel: f64,
        load: f64,
    ) -> AssumptionRecord {
        AssumptionRecord {
            supplysector: sector.to_string(),
            tran_subsector: subsector.to_string(),
            stub_technology: tech.to_string(),
            year,
            annual_travel_per_vehicle: travel,
            load_factor: load,
        }
    }

    #[test]
    fn test_coefficient_value() {
        // (1 / 10) * 0.05 * 1e6 == 5000
        let targets = vec![target("USA", 2030, "trn_pass_road", "Car", 0.05)];
        let assumptions = vec![assumption("trn_pass_road", "Car", "BEV", 2030, 10.0, 2.0)];

        let rows = coefficient_rows(&targets, &assumptions).expect("join should match");
        assert_eq!(rows.len(), 1);
        assert!(
            (rows[0].coefficient - 5000.0).abs() < 1e-9,
            "coefficient should be 5000, got {}",
            rows[0].coefficient
        );
        assert_eq!(rows[0].energy_input, "EVTarget2030_pass");
    }

    #[test]
    fn test_output_ratio_value() {
        // (1 / 10) / 2 * 1e6 / 1e9 == 0.00005
        let targets = vec![target("USA", 2030, "trn_pass_road", "Car", 0.05)];
        let assumptions = vec![assumption("trn_pass_road", "Car", "BEV", 2030, 10.0, 2.0)];

        let rows = resource_rows(&targets, &assumptions).expect("join should match");
        assert_eq!(rows.len(), 1);
        assert!(
            (rows[0].output_ratio - 0.00005).abs() < 1e-12,
            "output ratio should be 0.00005, got {}",
            rows[0].output_ratio
        );
        assert!((rows[0].p_multiplier - 1e9).abs() < f64::EPSILON);
        assert_eq!(rows[0].secondary_output, "EVTarget2030_pass");
    }

    #[test]
    fn test_non_bev_assumptions_are_filtered() {
        let targets = vec![target("USA", 2030, "trn_pass_road", "Car", 0.05)];
        let assumptions = vec![
            assumption("trn_pass_road", "Car", "Liquids", 2030, 10.0, 2.0),
            assumption("trn_pass_road", "Car", "FCEV", 2030, 10.0, 2.0),
        ];

        let err = coefficient_rows(&targets, &assumptions).unwrap_err();
        assert!(
            matches!(err, EvPolicyError::NoData(_)),
            "no BEV rows should mean no data"
        );
    }

    #[test]
    fn test_unmatched_targets_are_dropped() {
        // The 2035 target has no matching BEV assumption year; only 2030
        // joins. Dropping the rest is the intended filter.
        let targets = vec![
            target("USA", 2030, "trn_pass_road", "Car", 0.05),
            target("USA", 2035, "trn_pass_road", "Car", 0.10),
        ];
        let assumptions = vec![assumption("trn_pass_road", "Car", "BEV", 2030, 10.0, 2.0)];

        let rows = coefficient_rows(&targets, &assumptions).expect("2030 should join");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2030);
    }

    #[test]
    fn test_zero_travel_is_fatal() {
        let targets = vec![target("USA", 2030, "trn_pass_road", "Car", 0.05)];
        let assumptions = vec![assumption("trn_pass_road", "Car", "BEV", 2030, 0.0, 2.0)];

        let err = coefficient_rows(&targets, &assumptions).unwrap_err();
        match err {
            EvPolicyError::InvalidValue(msg) => {
                assert!(msg.contains("annual travel"), "message should name the field");
            }
            _ => panic!("Expected InvalidValue for zero travel"),
        }
    }

    #[test]
    fn test_zero_load_factor_is_fatal() {
        let targets = vec![target("USA", 2030, "trn_freight_road", "Truck", 0.05)];
        let assumptions = vec![assumption("trn_freight_road", "Truck", "BEV", 2030, 10.0, 0.0)];

        let err = resource_rows(&targets, &assumptions).unwrap_err();
        assert!(
            matches!(err, EvPolicyError::InvalidValue(_)),
            "zero load factor should be fatal"
        );
    }

    #[test]
    fn test_unrecognized_sector_in_join_is_fatal() {
        let targets = vec![target("USA", 2030, "shipping", "Intl", 0.05)];
        let assumptions = vec![assumption("shipping", "Intl", "BEV", 2030, 10.0, 2.0)];

        let err = coefficient_rows(&targets, &assumptions).unwrap_err();
        assert!(
            matches!(err, EvPolicyError::InvalidFormat(_)),
            "strict naming should reject unrecognized sectors"
        );
    }

    #[test]
    fn test_freight_name_derivation() {
        let targets = vec![target("China", 2040, "trn_freight_road", "Truck", 0.5)];
        let assumptions =
            vec![assumption("trn_freight_road", "Truck", "BEV", 2040, 40000.0, 5.0)];

        let rows = coefficient_rows(&targets, &assumptions).expect("join should match");
        assert_eq!(rows[0].energy_input, "EVTarget2040_freight");
    }
}
