//! Transport-category classification of supplysector names.
//!
//! Two call sites consume the same prefix test with different strictness:
//! the energy-input naming path treats an unrecognized sector as a hard data
//! error, while the policy-node category collection silently filters it.
//! The classifier returns a tagged variant so each caller states its policy
//! explicitly instead of duplicating the prefix match.

use crate::error::{EvPolicyError, Result};

/// Category of a transport supply sector, decided by its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportCategory {
    /// Sectors named `trn_freight*`
    Freight,
    /// Sectors named `trn_pass*`
    Passenger,
    /// Any other sector name
    Unrecognized,
}

impl TransportCategory {
    /// Classify a supplysector name by prefix.
    #[must_use]
    pub fn of(supplysector: &str) -> Self {
        if supplysector.starts_with("trn_freight") {
            Self::Freight
        } else if supplysector.starts_with("trn_pass") {
            Self::Passenger
        } else {
            Self::Unrecognized
        }
    }

    /// Short label used in derived names, `None` for unrecognized sectors.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Freight => Some("freight"),
            Self::Passenger => Some("pass"),
            Self::Unrecognized => None,
        }
    }
}

/// Derive the `EVTarget{year}_{category}` energy-input name for a
/// supplysector, failing on unrecognized sector names.
///
/// This is the strict path: a sector outside the two recognized prefixes is
/// an input-data defect, not something to paper over with a default.
///
/// # Errors
///
/// Returns [`EvPolicyError::InvalidFormat`] when the sector name matches
/// neither `trn_freight*` nor `trn_pass*`.
///
/// # Examples
///
/// ```
/// use evpolicy_core::classify::derive_energy_input_name;
///
/// let name = derive_energy_input_name("trn_freight_road", 2030)?;
/// assert_eq!(name, "EVTarget2030_freight");
/// # Ok::<(), evpolicy_core::EvPolicyError>(())
/// ```
pub fn derive_energy_input_name(supplysector: &str, year: i32) -> Result<String> {
    match TransportCategory::of(supplysector).label() {
        Some(category) => Ok(format!("EVTarget{year}_{category}")),
        None => Err(EvPolicyError::InvalidFormat(format!(
            "supplysector '{supplysector}' matches neither trn_freight* nor trn_pass*"
        ))),
    }
}
