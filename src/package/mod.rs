//! UI package description: resource records, controller tables, and the
//! `package.xml` manifest. This is the complete in-memory output of a
//! conversion, ready for the directory or archive writer.

mod registry;
pub mod writer;

pub use registry::{ResourceHandle, ResourceRegistry};

use indexmap::IndexMap;

use crate::element::Element;

/// Kind of a packaged resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Encoded raster art, stored under `Images/`.
    Image,
    /// A generated component XML document.
    Component,
}

impl ResourceKind {
    /// Element tag used for this kind in the `package.xml` manifest.
    pub fn manifest_tag(self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Component => "component",
        }
    }
}

/// One deduplicated resource of a package. Immutable once registered;
/// placements reference it by `id`.
#[derive(Debug, Clone)]
pub struct ResourceRecord {
    /// Package-unique id: build-id suffix + sequential base-36 index.
    pub id: String,
    /// Collision-free file name, decorator fragments stripped.
    pub name: String,
    pub kind: ResourceKind,
    /// Storage path classification: `/Images/`, `/Components/`, or `/`.
    pub path: String,
    /// Payload bytes: encoded image data, or serialized XML text.
    pub data: Vec<u8>,
}

/// Ordered controller metadata collected while walking one component:
/// controller name → ordered page labels. Insertion order is part of the
/// output contract.
#[derive(Debug, Clone, Default)]
pub struct ControllerTable(IndexMap<String, Vec<String>>);

impl ControllerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, pages: Vec<String>) {
        self.0.insert(name, pages);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Flatten page labels into the manifest form `0,label0,1,label1,...`.
    pub fn flatten_pages(pages: &[String]) -> String {
        let mut out = String::new();
        for (idx, label) in pages.iter().enumerate() {
            if idx > 0 {
                out.push(',');
            }
            out.push_str(&idx.to_string());
            out.push(',');
            out.push_str(label);
        }
        out
    }
}

/// A complete converted package: id plus all resources in registration
/// order.
#[derive(Debug, Clone)]
pub struct UiPackage {
    /// 8-character package id (the build id's head).
    pub id: String,
    pub resources: Vec<ResourceRecord>,
}

impl UiPackage {
    /// Generate the `package.xml` manifest document.
    pub fn manifest_xml(&self) -> String {
        let mut desc = Element::new("packageDescription").att("id", &self.id);
        let mut resources = Element::new("resources");
        for record in &self.resources {
            resources.push(
                Element::new(record.kind.manifest_tag())
                    .att("id", &record.id)
                    .att("name", &record.name)
                    .att("path", &record.path),
            );
        }
        desc.push(resources);
        desc.to_xml()
    }

    /// Look up a resource by file name.
    pub fn resource(&self, name: &str) -> Option<&ResourceRecord> {
        self.resources.iter().find(|r| r.name == name)
    }
}
