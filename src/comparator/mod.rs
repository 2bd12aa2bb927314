//! Three-column alignment diagrams ("comparator").
//!
//! Pipeline: raw cell -> [`cell::parse_cell`] -> [`table::TableModel::build`]
//! -> [`expand::View`] -> [`layout::layout`] -> [`compose::compose`].
//!
//! | Module    | Responsibility                                            |
//! |-----------|-----------------------------------------------------------|
//! | `cell`    | Identifier tag and marker extraction from one cell        |
//! | `table`   | Identifier registry and deduplicated per-column blocks    |
//! | `expand`  | Merge closure over all columns; views                     |
//! | `layout`  | Slot heights, stacking, card extents and anchors          |
//! | `ribbon`  | Sigmoid connectors between adjacent columns               |
//! | `compose` | Scene assembly for one view or a batch of views           |

pub mod cell;
pub mod compose;
pub mod expand;
pub mod layout;
pub mod ribbon;
pub mod table;

pub use cell::{ParsedCell, parse_cell};
pub use compose::{DiagramRequest, Selection, compose, compose_batch};
pub use expand::{View, closure_groups, expand};
pub use layout::{Anchor, Layout, LayoutParams, layout};
pub use table::{Block, Column, Row, TableModel};
