//! # fairypack
//!
//! Convert a layered design-document tree into a FairyGUI UI package.
//!
//! Layer-naming conventions drive the conversion: group names classify
//! widgets (`Com...` components, `...Btn` buttons, `...Slider`,
//! `...ProBar`, `...@RadioGroup`), `@` markers tag special roles
//! (`@title`, `@icon`, `grip@`, `@bar`, `@up`/`@down` button states).
//! Identical art and markup are deduplicated by content hash, and a fixed
//! build id makes the whole package byte-reproducible.
//!
//! ## Quick Start
//!
//! ```
//! use fairypack::{Bounds, DesignNode, ExportOptions, PixelData, convert};
//!
//! let art = PixelData {
//!     rgba: vec![0xff; 16],
//!     encoded: vec![0x89, 0x50, 0x4e, 0x47],
//! };
//! let tree = DesignNode::group(
//!     "home",
//!     Bounds::new(0, 0, 640, 480),
//!     vec![DesignNode::image("bg", Bounds::new(0, 0, 640, 480), art)],
//! );
//!
//! let pkg = convert(&tree, "home", ExportOptions::NONE, "abcdefghxyz").unwrap();
//! assert!(pkg.resource("home.xml").is_some());
//! assert!(pkg.resource("bg.png").is_some());
//! ```
//!
//! The decoder that produces the [`DesignNode`] tree from a concrete design
//! file format is external; write the result with
//! [`package::writer`] or let [`convert_to_file`] do both steps.

pub mod build;
pub mod classify;
pub mod design;
pub mod element;
pub mod error;
pub mod package;
pub(crate) mod util;

pub use build::{BuildContext, ExportOptions, convert, convert_to_file};
pub use design::{Bounds, DesignNode, NodeContent, PixelData, TextAlign, TextData, TextRun};
pub use error::{Error, Result};
pub use package::{ControllerTable, ResourceKind, ResourceRecord, UiPackage};
pub use util::gen_build_id;
