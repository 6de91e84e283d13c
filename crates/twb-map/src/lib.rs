//! Mapping sets and the remap engine.
//!
//! A mapping source is a headerless two-column CSV: the original name, then
//! its replacement. [`load_mapping_set`] turns it into a [`MappingSet`] and
//! [`apply`] runs the rules over raw workbook text.
//!
//! ```
//! use twb_map::{RowPolicy, apply, parse_mapping_set};
//!
//! let rules = parse_mapping_set("A,B\nB,C\n", RowPolicy::Lenient).unwrap();
//! let remapped = apply("A", &rules).unwrap();
//! assert_eq!(remapped.text, "C");
//! assert_eq!(remapped.report.total_replacements(), 2);
//! ```
//!
//! [`MappingSet`]: twb_model::MappingSet

mod engine;
mod error;
mod loader;

pub use engine::{Remapped, apply};
pub use error::MappingError;
pub use loader::{RowPolicy, load_mapping_set, parse_mapping_set};
