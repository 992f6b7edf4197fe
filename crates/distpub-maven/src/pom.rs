//! Minimal POM synthesis for published distributions.
//!
//! The generated document carries only the coordinates and packaging, which
//! is all a Maven-layout repository needs to index the artifact. No
//! dependencies or build configuration are emitted.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use distpub_core::coordinates::PublishCoordinates;
use distpub_util::errors::DistError;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";
const MODEL_VERSION: &str = "4.0.0";

/// Packaging used when the artifact has no file extension.
pub const DEFAULT_PACKAGING: &str = "pom";

/// Packaging type for an artifact extension: `.tgz` becomes `tgz`.
pub fn packaging_for_extension(extension: &str) -> &str {
    match extension.trim_start_matches('.') {
        "" => DEFAULT_PACKAGING,
        ext => ext,
    }
}

/// Render the POM for `coords` as UTF-8 bytes.
pub fn build_descriptor(coords: &PublishCoordinates, packaging: &str) -> miette::Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new("\n")))
        .map_err(xml_err)?;

    let mut project = BytesStart::new("project");
    project.push_attribute(("xmlns", POM_NAMESPACE));
    project.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    project.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    writer.write_event(Event::Start(project)).map_err(xml_err)?;

    for (tag, value) in [
        ("modelVersion", MODEL_VERSION),
        ("groupId", coords.group_id()),
        ("artifactId", coords.artifact_id()),
        ("version", coords.version()),
        ("packaging", packaging),
    ] {
        writer
            .write_event(Event::Text(BytesText::new("\n  ")))
            .map_err(xml_err)?;
        writer
            .create_element(tag)
            .write_text_content(BytesText::new(value))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::Text(BytesText::new("\n")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("project")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new("\n")))
        .map_err(xml_err)?;

    Ok(writer.into_inner())
}

fn xml_err(e: impl std::fmt::Display) -> DistError {
    DistError::Generic {
        message: format!("Failed to write POM: {e}"),
    }
}
