//! Parallel-column alignment diagrams and status timelines for historical
//! sources.
//!
//! The core is the comparator: three columns of text from different editions
//! of the same work, tagged with identifiers that say which passages
//! correspond. The crate parses the tags, reconciles rows that split, merge
//! or move between editions, lays the passages out without overlap and draws
//! ribbons between matching passages. Output is a [`scene::Scene`] of plain
//! drawing primitives, serialized to SVG by [`svg`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`comparator`] | Cell parsing, block building, closure, layout, ribbons, composition |
//! | [`document`] | JSON source documents and subject detection |
//! | [`cache`] | Content-hash keyed parse cache |
//! | [`export`] | Batch export of diagrams with a manifest |
//! | [`chart`] | Status bar charts and route timelines |
//! | [`scene`] | Drawing primitives |
//! | [`svg`] | SVG serialization |
//! | [`text`] | Character-width word wrapping |
//! | [`config`] | Layered diagram configuration |
//! | [`consts`] | Canvas geometry constants |
//! | [`error`] | Crate error type |

pub mod cache;
pub mod chart;
pub mod comparator;
pub mod config;
pub mod consts;
pub mod document;
pub mod error;
pub mod export;
pub mod scene;
pub mod svg;
pub mod text;

pub use config::DiagramConfig;
pub use error::SynopticError;
