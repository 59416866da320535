//! Project description parsing.
//!
//! [`DescriptionParser`] is the seam between the collector and a concrete
//! description dialect. [`MsBuildParser`] handles MSBuild XML
//! (`.vcxproj`, `.csproj`, `.proj`) using `quick-xml`'s pull reader.
//!
//! Only two paths below the root element are read:
//!
//! - `PropertyGroup>{TargetName, ProjectName, RootNamespace, ConfigurationType}`
//! - `ItemGroup>ClCompile@Include`
//!
//! Everything else is skipped, but the whole root element must still be
//! well-formed.

use std::{
    fs::File,
    io::Read,
    mem,
    path::Path,
};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::ParseError,
    project::{ConfigurationType, ProjectDescription, ProjectRecord},
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const PROPERTY_GROUP: &str = "PropertyGroup";
const ITEM_GROUP: &str = "ItemGroup";
const CL_COMPILE: &str = "ClCompile";
const INCLUDE: &str = "Include";

/// A parser for one project description dialect.
pub trait DescriptionParser: Send + Sync {
    /// The record type this dialect produces.
    type Description: ProjectDescription + Send;

    /// Read and decode one description file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] if the file cannot be read and
    /// [`ParseError::Format`] if its contents are malformed.
    fn parse(&self, path: &Path) -> Result<Self::Description, ParseError>;
}

/// Parser for MSBuild project files.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsBuildParser;

impl DescriptionParser for MsBuildParser {
    type Description = ProjectRecord;

    fn parse(&self, path: &Path) -> Result<ProjectRecord, ParseError> {
        parse_project(path)
    }
}

/// Read an MSBuild project file into a [`ProjectRecord`].
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be opened or read, and
/// [`ParseError::Format`] if it is not a well-formed XML document.
pub fn parse_project(path: &Path) -> Result<ProjectRecord, ParseError> {
    let mut file = File::open(path).map_err(|e| ParseError::io(path, e))?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| ParseError::io(path, e))?;

    parse_document(path, &content)
}

/// Decode the bytes of an MSBuild project file.
///
/// `path` is only recorded in the result and in errors; nothing is read
/// from disk.
///
/// # Errors
///
/// Returns [`ParseError::Format`] on invalid UTF-8, a syntax error, or a
/// document without a complete root element.
pub fn parse_document(path: &Path, bytes: &[u8]) -> Result<ProjectRecord, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let content = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::format(path, format!("invalid UTF-8: {e}")))?;

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut record = ProjectRecord::new(path.to_path_buf());
    // Local names of the open elements, root first.
    let mut open: Vec<String> = Vec::new();
    let mut text = String::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(ParseError::format(
                    path,
                    format!("{e} at position {}", reader.buffer_position()),
                ));
            }
        };

        match event {
            Event::Start(start) => {
                check_attributes(path, &start)?;
                let name = local_name(&start);
                if in_group(&open, ITEM_GROUP) && name == CL_COMPILE {
                    push_include(&mut record, &start)?;
                }
                open.push(name);
                if open.len() == 3 {
                    text.clear();
                }
            }
            Event::Empty(start) => {
                check_attributes(path, &start)?;
                if open.is_empty() {
                    // `<Project/>`: a complete, empty document
                    return Ok(record);
                }
                let name = local_name(&start);
                if in_group(&open, PROPERTY_GROUP) {
                    assign_property(&mut record, &name, String::new());
                } else if in_group(&open, ITEM_GROUP) && name == CL_COMPILE {
                    push_include(&mut record, &start)?;
                }
            }
            Event::Text(t) => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| ParseError::format(path, e.to_string()))?;
                if open.len() == 3 {
                    text.push_str(&unescaped);
                }
            }
            Event::CData(c) if open.len() == 3 => {
                text.push_str(&String::from_utf8_lossy(&c));
            }
            Event::End(_) => {
                if open.len() == 3 && open[1] == PROPERTY_GROUP {
                    assign_property(&mut record, &open[2], mem::take(&mut text));
                }
                open.pop();
                if open.is_empty() {
                    // Content after the root element is not read.
                    return Ok(record);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // A closed root element returns above, so reaching EOF is always an error.
    Err(match open.last() {
        Some(name) => ParseError::format(
            path,
            format!("unexpected end of document: <{name}> is not closed"),
        ),
        None => ParseError::format(path, "document has no root element"),
    })
}

/// Whether the innermost open element is a direct child of the root named
/// `group`.
fn in_group(open: &[String], group: &str) -> bool {
    open.len() == 2 && open[1] == group
}

/// Every attribute must be well-formed and its value must unescape, even
/// on elements whose attributes are never read.
fn check_attributes(path: &Path, start: &BytesStart<'_>) -> Result<(), ParseError> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::format(path, e.to_string()))?;
        attr.unescape_value()
            .map_err(|e| ParseError::format(path, e.to_string()))?;
    }
    Ok(())
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn assign_property(record: &mut ProjectRecord, name: &str, value: String) {
    match name {
        "TargetName" => record.target_name = Some(value),
        "ProjectName" => record.project_name = Some(value),
        "RootNamespace" => record.root_namespace = Some(value),
        "ConfigurationType" => record.configuration_type = ConfigurationType::from_raw(&value),
        _ => {}
    }
}

fn push_include(record: &mut ProjectRecord, start: &BytesStart<'_>) -> Result<(), ParseError> {
    let attr = start
        .try_get_attribute(INCLUDE)
        .map_err(|e| ParseError::format(&record.file_path, e.to_string()))?;

    let Some(attr) = attr else {
        tracing::debug!(
            path = %record.file_path.display(),
            "ClCompile item without Include attribute"
        );
        return Ok(());
    };

    let value = attr
        .unescape_value()
        .map_err(|e| ParseError::format(&record.file_path, e.to_string()))?;
    record.compiled_files.push(value.into_owned());
    Ok(())
}
