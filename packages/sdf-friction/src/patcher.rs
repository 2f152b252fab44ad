//! File-level driver: read, validate, patch and write one SDF document.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::FrictionProfile;
use crate::error::{PatchError, Result};
use crate::patch::{patch_document, PatchReport};
use crate::xml::{write_document, XmlDocument};

/// Patch `input` with `profile` and write the result to `output`.
///
/// Nothing is written when the input cannot be read, is not well-formed
/// XML, or does not have an `<sdf>` root.
///
/// # Arguments
/// * `input` - Path to the source SDF file
/// * `output` - Destination path (may equal `input`)
/// * `profile` - Links, coefficients and model filter to apply
///
/// # Returns
/// Counters describing what was changed
pub fn patch_file(input: &Path, output: &Path, profile: &FrictionProfile) -> Result<PatchReport> {
    let xml = fs::read_to_string(input).map_err(|e| PatchError::io(input, e))?;
    let mut doc = XmlDocument::parse(&xml)?;

    let report = patch_document(&mut doc, profile)?;
    info!(
        input = %input.display(),
        models = report.models_matched,
        patched = report.patched_links,
        removed = report.removed_surfaces,
        "Patched document"
    );

    write_document(&doc, output)?;
    Ok(report)
}
