//! Configuration-document construction.
//!
//! Builds the nested policy document from the two output tables in an
//! explicit grouping pass: region → supplysector → tranSubsector →
//! stub-technology → period, in first-occurrence order over the sorted
//! table. Rendering to XML is a separate pass in
//! [`crate::serializer::xml`], so what groups exist is decoupled from how
//! they are serialized.

use crate::calculator::BEV_TECHNOLOGY;
use crate::classify::TransportCategory;
use crate::records::{CoefTableRow, ResTableRow};
use std::collections::HashMap;

/// Fixed years for which every region receives policy constraint nodes.
pub const POLICY_YEARS: [i32; 8] = [2025, 2030, 2035, 2040, 2045, 2050, 2055, 2060];

/// Policy type tag carried by every generated policy node.
pub const POLICY_TYPE: &str = "RES";

/// The assembled document tree. Built once, serialized once, never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDocument {
    pub regions: Vec<RegionNode>,
}

/// One region: its sector hierarchy followed by its policy nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionNode {
    pub name: String,
    pub sectors: Vec<SectorNode>,
    pub policies: Vec<PolicyNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorNode {
    pub name: String,
    pub subsectors: Vec<SubsectorNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubsectorNode {
    pub name: String,
    pub technologies: Vec<TechnologyNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TechnologyNode {
    pub name: String,
    pub periods: Vec<PeriodNode>,
}

/// One model period of one technology leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodNode {
    pub year: i32,
    pub energy_input: EnergyInputNode,
    /// Present only on BEV leaves with a matching resource row.
    pub secondary_output: Option<SecondaryOutputNode>,
}

/// The `minicam-energy-input` payload, emitted for every period.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyInputNode {
    pub name: String,
    /// Empty element text when the left join found no coefficient.
    pub coefficient: Option<f64>,
    pub market: String,
}

/// The `res-secondary-output` payload attached to matched BEV periods.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryOutputNode {
    pub name: String,
    pub output_ratio: f64,
    pub p_multiplier: f64,
}

/// One `policy-portfolio-standard` node.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyNode {
    pub name: String,
    pub market: String,
    pub constraint_year: i32,
}

/// Group values by key preserving first-occurrence order of the keys.
fn group_in_order<'a, T, K, F>(
    items: impl IntoIterator<Item = &'a T>,
    key_of: F,
) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();
    for item in items {
        let key = key_of(item);
        if let Some(&i) = index.get(&key) {
            groups[i].1.push(item);
        } else {
            index.insert(key.clone(), groups.len());
            groups.push((key, vec![item]));
        }
    }
    groups
}

/// Build the document tree from output table 1, attaching resource outputs
/// from output table 2 to matched BEV leaves.
///
/// A BEV leaf with no table-2 match simply carries no secondary output; the
/// resource join may legitimately have dropped it.
#[must_use]
pub fn build_document(coef_table: &[CoefTableRow], res_table: &[ResTableRow]) -> PolicyDocument {
    let resource_index: HashMap<(&str, &str, &str, i32), &ResTableRow> = res_table
        .iter()
        .map(|row| {
            (
                (
                    row.region.as_str(),
                    row.supplysector.as_str(),
                    row.tran_subsector.as_str(),
                    row.year,
                ),
                row,
            )
        })
        .collect();

    let regions = group_in_order(coef_table.iter(), |r| r.region.clone())
        .into_iter()
        .map(|(region, region_rows)| {
            let sectors = group_in_order(region_rows.iter().copied(), |r| r.supplysector.clone())
                .into_iter()
                .map(|(sector, sector_rows)| SectorNode {
                    subsectors: build_subsectors(&sector_rows, &resource_index),
                    name: sector,
                })
                .collect();

            RegionNode {
                policies: build_policies(&region, &region_rows),
                sectors,
                name: region,
            }
        })
        .collect();

    PolicyDocument { regions }
}

fn build_subsectors(
    sector_rows: &[&CoefTableRow],
    resource_index: &HashMap<(&str, &str, &str, i32), &ResTableRow>,
) -> Vec<SubsectorNode> {
    group_in_order(sector_rows.iter().copied(), |r| r.tran_subsector.clone())
        .into_iter()
        .map(|(subsector, subsector_rows)| {
            let technologies =
                group_in_order(subsector_rows.iter().copied(), |r| r.stub_technology.clone())
                    .into_iter()
                    .map(|(technology, tech_rows)| TechnologyNode {
                        periods: tech_rows
                            .iter()
                            .map(|row| build_period(row, &technology, resource_index))
                            .collect(),
                        name: technology,
                    })
                    .collect();

            SubsectorNode {
                name: subsector,
                technologies,
            }
        })
        .collect()
}

fn build_period(
    row: &CoefTableRow,
    technology: &str,
    resource_index: &HashMap<(&str, &str, &str, i32), &ResTableRow>,
) -> PeriodNode {
    let secondary_output = if technology == BEV_TECHNOLOGY {
        resource_index
            .get(&(
                row.region.as_str(),
                row.supplysector.as_str(),
                row.tran_subsector.as_str(),
                row.year,
            ))
            .map(|res| SecondaryOutputNode {
                name: res.res_secondary_output.clone(),
                output_ratio: res.output_ratio,
                p_multiplier: res.p_multiplier,
            })
    } else {
        None
    };

    PeriodNode {
        year: row.year,
        energy_input: EnergyInputNode {
            name: row.minicam_energy_input.clone(),
            coefficient: row.coefficient,
            market: row.market_name.clone(),
        },
        secondary_output,
    }
}

/// Policy nodes for one region: the fixed year list crossed with the
/// transport categories present in the region. Unrecognized sector prefixes
/// are filtered here, not rejected; only the naming path is strict.
fn build_policies(region: &str, region_rows: &[&CoefTableRow]) -> Vec<PolicyNode> {
    let mut categories: Vec<TransportCategory> = Vec::new();
    for row in region_rows {
        match TransportCategory::of(&row.supplysector) {
            TransportCategory::Unrecognized => {
                log::debug!(
                    "skipping unrecognized sector '{}' for policy nodes in {region}",
                    row.supplysector
                );
            }
            category if !categories.contains(&category) => categories.push(category),
            _ => {}
        }
    }

    let mut policies = Vec::with_capacity(POLICY_YEARS.len() * categories.len());
    for year in POLICY_YEARS {
        for category in &categories {
            // label() is Some for every category kept above
            let Some(label) = category.label() else {
                continue;
            };
            policies.push(PolicyNode {
                name: format!("EVTarget{year}_{label}"),
                market: region.to_string(),
                constraint_year: year,
            });
        }
    }
    policies
}
