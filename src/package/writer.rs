//! Package emission: an unpacked directory tree or a `.fairypackage` zip
//! archive. Writing happens only after the in-memory package is complete,
//! so a failed write never leaves a claimed-valid package behind.

use std::fs;
use std::io::{Seek, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::UiPackage;
use crate::error::Result;

/// Relative storage path of a record inside the package (manifest paths
/// carry a leading slash).
fn relative_path(path: &str, name: &str) -> String {
    format!("{}{}", path.trim_start_matches('/'), name)
}

/// Write the package as a plain directory (the no-pack export mode).
pub fn write_package_dir<P: AsRef<Path>>(pkg: &UiPackage, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    for record in &pkg.resources {
        let target = dir.join(relative_path(&record.path, &record.name));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, &record.data)?;
    }
    fs::write(dir.join("package.xml"), pkg.manifest_xml())?;
    Ok(())
}

/// Write the package as a `.fairypackage` zip archive on disk.
pub fn write_package_zip<P: AsRef<Path>>(pkg: &UiPackage, path: P) -> Result<()> {
    let file = fs::File::create(path)?;
    write_package_to_writer(pkg, file)
}

/// Write the package archive to any [`Write`] + [`Seek`] destination.
pub fn write_package_to_writer<W: Write + Seek>(pkg: &UiPackage, writer: W) -> Result<()> {
    let mut zip = ZipWriter::new(writer);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for record in &pkg.resources {
        zip.start_file(relative_path(&record.path, &record.name), options)?;
        zip.write_all(&record.data)?;
    }

    zip.start_file("package.xml", options)?;
    zip.write_all(pkg.manifest_xml().as_bytes())?;

    zip.finish()?;
    Ok(())
}
