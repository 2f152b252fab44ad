//! Indenting XML serializer and atomic file output.

use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::tree::{Element, Node, XmlDocument};
use crate::error::{PatchError, Result};

/// Spaces per nesting level in the output.
pub const INDENT_WIDTH: usize = 2;

/// Serialize a document with an XML declaration and 2-space indentation.
///
/// Elements without children are written self-closing; elements holding
/// only text stay on one line.
///
/// # Examples
/// ```
/// use sdf_friction::xml::{to_xml_string, XmlDocument};
///
/// let doc = XmlDocument::parse("<sdf><model name=\"m\"><link/></model></sdf>").unwrap();
/// let xml = to_xml_string(&doc).unwrap();
/// assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
/// assert!(xml.contains("\n    <link/>\n"));
/// ```
pub fn to_xml_string(doc: &XmlDocument) -> Result<String> {
    let mut buffer = Vec::new();
    let mut writer = Writer::new_with_indent(Cursor::new(&mut buffer), b' ', INDENT_WIDTH);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    for comment in &doc.prolog {
        write_event(&mut writer, Event::Comment(BytesText::from_escaped(comment)))?;
    }
    write_element(&mut writer, &doc.root)?;
    for comment in &doc.epilog {
        write_event(&mut writer, Event::Comment(BytesText::from_escaped(comment)))?;
    }

    let mut xml = String::from_utf8(buffer)
        .map_err(|e| PatchError::Serialize(format!("UTF-8 error: {e}")))?;
    xml.push('\n');
    Ok(xml)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(text) => write_event(writer, Event::Text(BytesText::new(text)))?,
            Node::Comment(comment) => {
                write_event(writer, Event::Comment(BytesText::from_escaped(comment.as_str())))?
            }
        }
    }
    write_event(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| PatchError::Serialize(e.to_string()))
}

/// Serialize `doc` and write it to `path`.
///
/// The content goes to a hidden temporary file next to `path` first and is
/// renamed over it once fully flushed, so a failed write never leaves a
/// truncated output behind.
pub fn write_document(doc: &XmlDocument, path: &Path) -> Result<()> {
    let content = to_xml_string(doc)?;
    let temp_path = temp_path_for(path);

    let written = write_synced(&temp_path, content.as_bytes()).and_then(|()| {
        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(path).map_err(|e| PatchError::io(path, e))?;
        }

        fs::rename(&temp_path, path).map_err(|e| PatchError::io(path, e))
    });

    if written.is_err() {
        // Best effort; the original error is what matters.
        let _ = fs::remove_file(&temp_path);
    }
    written
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| PatchError::io(path, e))?;
    file.write_all(bytes).map_err(|e| PatchError::io(path, e))?;
    file.sync_all().map_err(|e| PatchError::io(path, e))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{file_name}.tmp"))
}
