//! Output table assembly.
//!
//! Left-joins the canonical key space against the computed coefficient rows.
//! Sparsity is preserved: a canonical row with no BEV coefficient still
//! appears in table 1 with an empty coefficient, and its energy-input name is
//! re-derived independently since it depends only on supplysector and year.

use crate::classify::derive_energy_input_name;
use crate::error::Result;
use crate::records::{CanonicalRow, CoefTableRow, CoefficientRow, ResTableRow, ResourceRow};
use std::collections::HashMap;

/// Assemble output table 1 (`StubTranTechCoef`).
///
/// The join key is (region, year, supplysector, tranSubsector); the
/// technology column comes from the canonical row. Rows are sorted ascending
/// by (region, supplysector, tranSubsector, stub.technology, year).
///
/// # Errors
///
/// Returns [`crate::EvPolicyError::InvalidFormat`] if any canonical
/// supplysector matches neither recognized transport prefix; the name column
/// is populated for every row, matched or not.
pub fn assemble_coef_table(
    canonical: &[CanonicalRow],
    coefficients: &[CoefficientRow],
) -> Result<Vec<CoefTableRow>> {
    let mut by_key: HashMap<(&str, i32, &str, &str), f64> = HashMap::new();
    for row in coefficients {
        let key = (
            row.region.as_str(),
            row.year,
            row.supplysector.as_str(),
            row.tran_subsector.as_str(),
        );
        if by_key.insert(key, row.coefficient).is_some() {
            log::warn!(
                "duplicate coefficient for {}/{}/{} in {}; keeping the last",
                row.region,
                row.supplysector,
                row.tran_subsector,
                row.year
            );
        }
    }

    let mut table = Vec::with_capacity(canonical.len());
    for row in canonical {
        let key = (
            row.region.as_str(),
            row.year,
            row.tech.supplysector.as_str(),
            row.tech.tran_subsector.as_str(),
        );
        table.push(CoefTableRow {
            region: row.region.clone(),
            year: row.year,
            supplysector: row.tech.supplysector.clone(),
            tran_subsector: row.tech.tran_subsector.clone(),
            stub_technology: row.tech.stub_technology.clone(),
            coefficient: by_key.get(&key).copied(),
            minicam_energy_input: derive_energy_input_name(&row.tech.supplysector, row.year)?,
            market_name: row.region.clone(),
        });
    }

    table.sort_by(|a, b| {
        a.region
            .cmp(&b.region)
            .then_with(|| a.supplysector.cmp(&b.supplysector))
            .then_with(|| a.tran_subsector.cmp(&b.tran_subsector))
            .then_with(|| a.stub_technology.cmp(&b.stub_technology))
            .then_with(|| a.year.cmp(&b.year))
    });
    Ok(table)
}

/// Assemble output table 2 (`StubTranTechRES`) from the resource rows.
///
/// Every row is a BEV row; the table keeps the join's row set unchanged and
/// uses the same sort order as table 1 for stable output.
#[must_use]
pub fn assemble_res_table(resources: &[ResourceRow]) -> Vec<ResTableRow> {
    let mut table: Vec<ResTableRow> = resources
        .iter()
        .map(|row| ResTableRow {
            region: row.region.clone(),
            supplysector: row.supplysector.clone(),
            tran_subsector: row.tran_subsector.clone(),
            stub_technology: crate::calculator::BEV_TECHNOLOGY.to_string(),
            year: row.year,
            res_secondary_output: row.secondary_output.clone(),
            output_ratio: row.output_ratio,
            p_multiplier: row.p_multiplier,
        })
        .collect();

    table.sort_by(|a, b| {
        a.region
            .cmp(&b.region)
            .then_with(|| a.supplysector.cmp(&b.supplysector))
            .then_with(|| a.tran_subsector.cmp(&b.tran_subsector))
            .then_with(|| a.year.cmp(&b.year))
    });
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TechTriple;

    fn canonical(region: &str, year: i32, sector: &str, subsector: &str, tech: &str) -> CanonicalRow {
        CanonicalRow {
            region: region.to_string(),
            year,
            tech: TechTriple {
                supplysector: sector.to_string(),
                tran_subsector: subsector.to_string(),
                stub_technology: tech.to_string(),
            },
        }
    }

    fn coefficient(region: &str, year: i32, sector: &str, subsector: &str, value: f64) -> CoefficientRow {
        CoefficientRow {
            region: region.to_string(),
            year,
            supplysector: sector.to_string(),
            tran_subsector: subsector.to_string(),
            coefficient: value,
            energy_input: format!("EVTarget{year}_pass"),
        }
    }

    #[test]
    fn test_left_join_preserves_unmatched_rows() {
        let canonical = vec![
            canonical("USA", 2030, "trn_pass_road", "Car", "BEV"),
            canonical("USA", 2030, "trn_pass_road", "Car", "Liquids"),
            canonical("USA", 2035, "trn_pass_road", "Car", "BEV"),
        ];
        let coefficients = vec![coefficient("USA", 2030, "trn_pass_road", "Car", 5000.0)];

        let table = assemble_coef_table(&canonical, &coefficients).expect("assembly");
        assert_eq!(table.len(), 3, "no canonical rows may be dropped");

        let unmatched: Vec<_> = table.iter().filter(|r| r.coefficient.is_none()).collect();
        assert_eq!(unmatched.len(), 1, "only the 2035 row is unmatched");
        assert_eq!(unmatched[0].year, 2035);
        assert_eq!(
            unmatched[0].minicam_energy_input, "EVTarget2035_pass",
            "name must be derived even without a coefficient match"
        );
    }

    #[test]
    fn test_join_key_ignores_technology() {
        // The coefficient is keyed on (region, year, sector, subsector); both
        // technology rows of that group receive it.
        let canonical = vec![
            canonical("USA", 2030, "trn_pass_road", "Car", "BEV"),
            canonical("USA", 2030, "trn_pass_road", "Car", "Liquids"),
        ];
        let coefficients = vec![coefficient("USA", 2030, "trn_pass_road", "Car", 5000.0)];

        let table = assemble_coef_table(&canonical, &coefficients).expect("assembly");
        assert!(
            table.iter().all(|r| r.coefficient == Some(5000.0)),
            "every technology in the joined group carries the coefficient"
        );
    }

    #[test]
    fn test_market_name_is_region() {
        let canonical = vec![canonical("EU-15", 2030, "trn_pass_road", "Car", "BEV")];
        let table = assemble_coef_table(&canonical, &[]).expect("assembly");
        assert_eq!(table[0].market_name, "EU-15");
    }

    #[test]
    fn test_sort_order() {
        let canonical = vec![
            canonical("USA", 2035, "trn_pass_road", "Car", "BEV"),
            canonical("USA", 2030, "trn_pass_road", "Car", "BEV"),
            canonical("China", 2030, "trn_pass_road", "Car", "BEV"),
            canonical("USA", 2030, "trn_freight_road", "Truck", "BEV"),
        ];

        let table = assemble_coef_table(&canonical, &[]).expect("assembly");
        let keys: Vec<_> = table
            .iter()
            .map(|r| (r.region.as_str(), r.supplysector.as_str(), r.year))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("China", "trn_pass_road", 2030),
                ("USA", "trn_freight_road", 2030),
                ("USA", "trn_pass_road", 2030),
                ("USA", "trn_pass_road", 2035),
            ],
            "rows should sort by region, sector, subsector, technology, year"
        );
    }

    #[test]
    fn test_res_table_rows_are_bev() {
        let resources = vec![ResourceRow {
            region: "USA".to_string(),
            year: 2030,
            supplysector: "trn_pass_road".to_string(),
            tran_subsector: "Car".to_string(),
            output_ratio: 0.00005,
            p_multiplier: 1e9,
            secondary_output: "EVTarget2030_pass".to_string(),
        }];

        let table = assemble_res_table(&resources);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].stub_technology, "BEV");
        assert_eq!(table[0].res_secondary_output, "EVTarget2030_pass");
    }
}
