//! Typed rows for the input tables, the join intermediates, and the two
//! output tables.
//!
//! Input records deserialize straight from the CSV headers via serde renames;
//! any extra input columns are ignored. Output rows serialize with the exact
//! header spelling the downstream model expects (`stub.technology`,
//! `EV_Sale_Target(%)`, `output.ratio`, ...).

use serde::{Deserialize, Serialize};

/// One EV adoption target: the share of sales that must be electric for a
/// (region, year, supplysector, tranSubsector) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    /// Model region name
    pub region: String,
    /// Target year
    pub year: i32,
    /// Transport supply sector (e.g. `trn_pass_road_LDV_4W`)
    pub supplysector: String,
    /// Transport subsector within the supply sector
    #[serde(rename = "tranSubsector")]
    pub tran_subsector: String,
    /// Sales target as a fraction of new sales
    #[serde(rename = "EV_Sale_Target(%)")]
    pub sale_target_percent: f64,
}

/// Vehicle usage assumptions for one technology in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionRecord {
    /// Transport supply sector
    pub supplysector: String,
    /// Transport subsector within the supply sector
    #[serde(rename = "tranSubsector")]
    pub tran_subsector: String,
    /// Technology leaf name (e.g. `BEV`, `Liquids`)
    #[serde(rename = "stub.technology")]
    pub stub_technology: String,
    /// Assumption year
    pub year: i32,
    /// Distance one vehicle covers per year
    #[serde(rename = "assumptions on annual travel per vehicle")]
    pub annual_travel_per_vehicle: f64,
    /// Average occupants or tonnes carried per vehicle
    #[serde(rename = "load factors")]
    pub load_factor: f64,
}

/// A distinct (supplysector, tranSubsector, stub.technology) combination
/// observed in the assumptions table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TechTriple {
    pub supplysector: String,
    pub tran_subsector: String,
    pub stub_technology: String,
}

/// One cell of the canonical key space: a (region, year) pair crossed with a
/// technology triple. Every canonical row becomes a row of output table 1
/// whether or not coefficient data exists for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    pub region: String,
    pub year: i32,
    pub tech: TechTriple,
}

/// Result of the BEV target join: the fuel coefficient for one
/// (region, year, supplysector, tranSubsector) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRow {
    pub region: String,
    pub year: i32,
    pub supplysector: String,
    pub tran_subsector: String,
    /// `(1 / annual_travel_per_vehicle) * sale_target_percent * 1e6`
    pub coefficient: f64,
    /// Derived `EVTarget{year}_{category}` name
    pub energy_input: String,
}

/// Result of the BEV target join on the resource side: the secondary-output
/// ratio feeding the RES policy market.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRow {
    pub region: String,
    pub year: i32,
    pub supplysector: String,
    pub tran_subsector: String,
    /// `(1 / annual_travel_per_vehicle) / load_factor * 1e6 / 1e9`
    pub output_ratio: f64,
    /// Fixed market scaling constant, always 1e9
    pub p_multiplier: f64,
    /// Derived `EVTarget{year}_{category}` name
    pub secondary_output: String,
}

/// One row of output table 1 (`StubTranTechCoef.csv`).
///
/// `coefficient` is explicitly nullable: canonical rows with no matching BEV
/// coefficient are still emitted, with an empty coefficient field. The name
/// and market columns are populated for every row regardless of join success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefTableRow {
    pub region: String,
    pub year: i32,
    pub supplysector: String,
    #[serde(rename = "tranSubsector")]
    pub tran_subsector: String,
    #[serde(rename = "stub.technology")]
    pub stub_technology: String,
    pub coefficient: Option<f64>,
    pub minicam_energy_input: String,
    pub market_name: String,
}

/// One row of output table 2 (`StubTranTechRES.csv`), BEV rows only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResTableRow {
    pub region: String,
    pub supplysector: String,
    #[serde(rename = "tranSubsector")]
    pub tran_subsector: String,
    #[serde(rename = "stub.technology")]
    pub stub_technology: String,
    pub year: i32,
    #[serde(rename = "res.secondary.output")]
    pub res_secondary_output: String,
    #[serde(rename = "output.ratio")]
    pub output_ratio: f64,
    #[serde(rename = "pMultiplier")]
    pub p_multiplier: f64,
}

impl TechTriple {
    /// Build a triple from an assumptions record.
    #[must_use]
    pub fn from_assumption(record: &AssumptionRecord) -> Self {
        Self {
            supplysector: record.supplysector.clone(),
            tran_subsector: record.tran_subsector.clone(),
            stub_technology: record.stub_technology.clone(),
        }
    }
}
