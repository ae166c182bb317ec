//! XML rendering of the policy document tree.
//!
//! Walks the already-grouped [`PolicyDocument`](crate::document::PolicyDocument)
//! and emits the fixed schema expected by the downstream model:
//! `<scenario><world>` root, nested region / supplysector / tranSubsector /
//! stub-technology / period elements, then the region's
//! `policy-portfolio-standard` siblings.

use crate::document::{
    PeriodNode, PolicyDocument, PolicyNode, RegionNode, POLICY_TYPE,
};
use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Options for XML serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlOptions {
    /// Indent nested elements (default: true)
    pub indent: bool,
    /// Spaces per indentation level when `indent` is true (default: 2)
    pub indent_width: usize,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            indent: true,
            indent_width: 2,
        }
    }
}

/// XML serializer for the policy document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XmlSerializer {
    options: XmlOptions,
}

impl XmlSerializer {
    /// Create a serializer with default options (two-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer with custom options.
    #[must_use]
    pub const fn with_options(options: XmlOptions) -> Self {
        Self { options }
    }

    /// Serialize the document tree to XML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EvPolicyError::Xml`] if event writing fails.
    pub fn serialize(&self, document: &PolicyDocument) -> Result<String> {
        let mut writer = if self.options.indent {
            Writer::new_with_indent(Vec::new(), b' ', self.options.indent_width)
        } else {
            Writer::new(Vec::new())
        };

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("scenario")))?;
        writer.write_event(Event::Start(BytesStart::new("world")))?;

        for region in &document.regions {
            write_region(&mut writer, region)?;
        }

        writer.write_event(Event::End(BytesEnd::new("world")))?;
        writer.write_event(Event::End(BytesEnd::new("scenario")))?;

        let bytes = writer.into_inner();
        // The writer only ever produced valid UTF-8
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn write_region(writer: &mut Writer<Vec<u8>>, region: &RegionNode) -> Result<()> {
    let mut start = BytesStart::new("region");
    start.push_attribute(("name", region.name.as_str()));
    writer.write_event(Event::Start(start))?;

    for sector in &region.sectors {
        let mut sector_start = BytesStart::new("supplysector");
        sector_start.push_attribute(("name", sector.name.as_str()));
        writer.write_event(Event::Start(sector_start))?;

        for subsector in &sector.subsectors {
            let mut subsector_start = BytesStart::new("tranSubsector");
            subsector_start.push_attribute(("name", subsector.name.as_str()));
            writer.write_event(Event::Start(subsector_start))?;

            for technology in &subsector.technologies {
                let mut tech_start = BytesStart::new("stub-technology");
                tech_start.push_attribute(("name", technology.name.as_str()));
                writer.write_event(Event::Start(tech_start))?;

                for period in &technology.periods {
                    write_period(writer, period)?;
                }

                writer.write_event(Event::End(BytesEnd::new("stub-technology")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("tranSubsector")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("supplysector")))?;
    }

    for policy in &region.policies {
        write_policy(writer, policy)?;
    }

    writer.write_event(Event::End(BytesEnd::new("region")))?;
    Ok(())
}

fn write_period(writer: &mut Writer<Vec<u8>>, period: &PeriodNode) -> Result<()> {
    let mut start = BytesStart::new("period");
    start.push_attribute(("year", period.year.to_string().as_str()));
    writer.write_event(Event::Start(start))?;

    let input = &period.energy_input;
    let mut input_start = BytesStart::new("minicam-energy-input");
    input_start.push_attribute(("name", input.name.as_str()));
    writer.write_event(Event::Start(input_start))?;

    // An unmatched row keeps its element with empty text; downstream
    // consumers treat the empty coefficient as null.
    let coefficient = input.coefficient.map(|v| v.to_string()).unwrap_or_default();
    write_text_element(writer, "coefficient", &coefficient)?;
    write_text_element(writer, "market-name", &input.market)?;
    writer.write_event(Event::End(BytesEnd::new("minicam-energy-input")))?;

    if let Some(output) = &period.secondary_output {
        let mut output_start = BytesStart::new("res-secondary-output");
        output_start.push_attribute(("name", output.name.as_str()));
        writer.write_event(Event::Start(output_start))?;
        write_text_element(writer, "output-ratio", &output.output_ratio.to_string())?;
        write_text_element(writer, "pMultiplier", &output.p_multiplier.to_string())?;
        writer.write_event(Event::End(BytesEnd::new("res-secondary-output")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("period")))?;
    Ok(())
}

fn write_policy(writer: &mut Writer<Vec<u8>>, policy: &PolicyNode) -> Result<()> {
    let mut start = BytesStart::new("policy-portfolio-standard");
    start.push_attribute(("name", policy.name.as_str()));
    writer.write_event(Event::Start(start))?;

    write_text_element(writer, "market", &policy.market)?;
    write_text_element(writer, "policyType", POLICY_TYPE)?;

    let mut constraint = BytesStart::new("constraint");
    constraint.push_attribute(("fillout", "1"));
    constraint.push_attribute(("year", policy.constraint_year.to_string().as_str()));
    writer.write_event(Event::Start(constraint))?;
    writer.write_event(Event::Text(BytesText::new("1")))?;
    writer.write_event(Event::End(BytesEnd::new("constraint")))?;

    writer.write_event(Event::End(BytesEnd::new("policy-portfolio-standard")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
