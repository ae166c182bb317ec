//! Output serialization module
//!
//! Renders the assembled tables to CSV and the policy document tree to XML.
//! Serialization is a pure value-to-string pass; file writing stays with the
//! caller so nothing touches disk until every output has been produced.

pub mod csv;
pub mod xml;

pub use csv::{coef_table_to_csv, res_table_to_csv};
pub use xml::{XmlOptions, XmlSerializer};
