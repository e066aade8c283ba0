//! Conversion pipeline: walks a design tree and assembles a UI package.
//!
//! All mutable conversion state lives in one [`BuildContext`] per
//! invocation. Recursion order determines id and name sequencing, so a
//! conversion is strictly single-threaded; independent conversions may run
//! concurrently with their own contexts.

mod walker;
mod widgets;

use std::ops::BitOr;
use std::path::Path;

use crate::design::DesignNode;
use crate::error::{Error, Result};
use crate::package::writer::{write_package_dir, write_package_zip};
use crate::package::{ResourceRegistry, UiPackage};
use crate::util::gen_build_id;

/// Export options bitmask.
///
/// Combine with `|`: `ExportOptions::NO_PACK | ExportOptions::IGNORE_FONT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportOptions(u32);

impl ExportOptions {
    pub const NONE: ExportOptions = ExportOptions(0);
    /// Emit an unpacked directory instead of a zip archive.
    pub const NO_PACK: ExportOptions = ExportOptions(1);
    /// Omit the font attribute on text elements.
    pub const IGNORE_FONT: ExportOptions = ExportOptions(2);

    pub fn contains(self, other: ExportOptions) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ExportOptions {
    type Output = ExportOptions;

    fn bitor(self, rhs: ExportOptions) -> ExportOptions {
        ExportOptions(self.0 | rhs.0)
    }
}

/// Per-conversion state: build identity, id sequencing, resource registry,
/// and export options. Nothing survives across conversions.
pub struct BuildContext {
    /// 8-character package id (head of the build id).
    pub(crate) package_id: String,
    /// Remainder of the build id, suffixed to every generated element id.
    pub(crate) item_id_base: String,
    pub(crate) registry: ResourceRegistry,
    pub(crate) options: ExportOptions,
}

impl BuildContext {
    pub fn new(build_id: &str, options: ExportOptions) -> Result<Self> {
        if build_id.len() <= 8 {
            return Err(Error::InvalidBuildId(format!(
                "need more than 8 characters, got {:?}",
                build_id
            )));
        }
        let (package_id, item_id_base) = build_id.split_at(8);
        Ok(Self {
            package_id: package_id.to_string(),
            item_id_base: item_id_base.to_string(),
            registry: ResourceRegistry::new(item_id_base),
            options,
        })
    }
}

/// Convert a design tree into an in-memory package description.
///
/// `name` becomes the file name of the top-level component (normally the
/// source document's stem). The same `build_id` always produces the same
/// package, byte for byte.
pub fn convert(
    root: &DesignNode,
    name: &str,
    options: ExportOptions,
    build_id: &str,
) -> Result<UiPackage> {
    if !root.is_group() {
        return Err(Error::InvalidDesign(
            "root node must be a group".to_string(),
        ));
    }
    let mut ctx = BuildContext::new(build_id, options)?;
    walker::build_component(&mut ctx, root, Some(name), true)?;
    Ok(UiPackage {
        id: ctx.package_id,
        resources: ctx.registry.into_records(),
    })
}

/// Convert a design tree and write the result to `output`: a directory
/// under [`ExportOptions::NO_PACK`], a zip archive otherwise.
///
/// Returns the build id used, so callers can pass it back in to keep
/// resource ids stable across repeated conversions of the same source.
pub fn convert_to_file<P: AsRef<Path>>(
    root: &DesignNode,
    name: &str,
    output: P,
    options: ExportOptions,
    build_id: Option<&str>,
) -> Result<String> {
    let build_id = match build_id {
        Some(id) => id.to_string(),
        None => gen_build_id(),
    };
    let pkg = convert(root, name, options, &build_id)?;
    if options.contains(ExportOptions::NO_PACK) {
        write_package_dir(&pkg, output)?;
    } else {
        write_package_zip(&pkg, output)?;
    }
    Ok(build_id)
}
