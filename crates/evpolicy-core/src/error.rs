//! Error types for the conversion pipeline.
//!
//! Every stage fails fast: the first error aborts the whole run and is
//! reported with enough context to identify the failing stage. There is no
//! partial-output mode and no retry.

use thiserror::Error;

/// Error types that can occur while converting scenario inputs.
///
/// # Examples
///
/// ```
/// use evpolicy_core::EvPolicyError;
///
/// let err = EvPolicyError::NoData("BEV join produced zero rows".to_string());
/// assert_eq!(
///     err.to_string(),
///     "no usable data: BEV join produced zero rows"
/// );
/// ```
#[derive(Error, Debug)]
pub enum EvPolicyError {
    /// File I/O error.
    ///
    /// Reading an input table or writing an output file failed, such as file
    /// not found, permission denied, or disk full.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-table parse error.
    ///
    /// A record in one of the input tables could not be parsed into its
    /// typed form (bad number, missing column, malformed row).
    #[error("table parse error: {0}")]
    Parse(String),

    /// The distinct-region or distinct-year set of the target table is empty.
    ///
    /// Raised before any output file is written; an empty key space means the
    /// canonical row set would be empty and the inputs are unusable.
    #[error("empty key space: {0}")]
    EmptyKeySpace(String),

    /// A supplysector name matched neither recognized transport prefix.
    ///
    /// Only raised on the strict naming path; the policy-node category
    /// collection filters unrecognized sectors instead.
    #[error("invalid supplysector format: {0}")]
    InvalidFormat(String),

    /// An input value makes a computed coefficient undefined or non-finite.
    ///
    /// Zero annual travel or a zero load factor is treated as a fatal data
    /// error rather than silently propagating an infinity.
    #[error("invalid input value: {0}")]
    InvalidValue(String),

    /// A required join produced zero rows.
    #[error("no usable data: {0}")]
    NoData(String),

    /// XML document construction or write failure.
    #[error("serialization error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl From<csv::Error> for EvPolicyError {
    /// I/O failures inside the CSV reader surface as [`EvPolicyError::Io`];
    /// everything else is a parse error.
    fn from(err: csv::Error) -> Self {
        let msg = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::Io(e),
            _ => Self::Parse(msg),
        }
    }
}

/// Type alias for [`Result<T, EvPolicyError>`].
pub type Result<T> = std::result::Result<T, EvPolicyError>;
