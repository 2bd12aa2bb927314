//! Batch export of comparator diagrams.
//!
//! DESIGN
//! ======
//! Export runs in two phases. [`plan`] decides which diagrams exist, what
//! they are called and whether each one carries the title/header; it touches
//! nothing on disk and is what tests exercise. [`export`] renders the plan
//! to SVG and writes `<name>.svg` files plus a `manifest.json` describing
//! them.
//!
//! Diagram names are stable across runs: `psalm_009_M-O` for a closure group
//! and `psalm_009` for a whole table. A repeated name gets a numeric suffix.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Serialize;

use crate::comparator::{DiagramRequest, View, closure_groups, compose_batch};
use crate::config::DiagramConfig;
use crate::document::ParsedDocument;
use crate::error::SynopticError;
use crate::svg::render_svg;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Which diagrams show the title and column headings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LegendPolicy {
    #[default]
    All,
    /// Only the first diagram of each table.
    FirstPerGroup,
    /// Exactly the named diagrams.
    Manual(BTreeSet<String>),
}

impl LegendPolicy {
    fn shows_header(&self, name: &str, position_in_table: usize) -> bool {
        match self {
            Self::All => true,
            Self::FirstPerGroup => position_in_table == 0,
            Self::Manual(names) => names.contains(name),
        }
    }
}

/// How each table is split into diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// One diagram per merge closure.
    #[default]
    PerClosure,
    /// One diagram per table.
    PerTable,
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub grouping: Grouping,
    pub legend: LegendPolicy,
    /// Indices of recognized tables to export; `None` exports all of them.
    pub tables: Option<Vec<usize>>,
}

/// One line of `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub name: String,
    pub file: String,
    pub subject: String,
    pub ids: Vec<String>,
    pub show_header: bool,
}

/// Diagrams of one table, ready to compose.
#[derive(Debug, Clone)]
pub struct TablePlan {
    pub table_index: usize,
    pub requests: Vec<DiagramRequest>,
}

/// Decide the diagrams to export.
///
/// # Errors
///
/// [`SynopticError::TableNotFound`] if a selected index does not exist.
pub fn plan(document: &ParsedDocument, options: &ExportOptions) -> Result<Vec<TablePlan>, SynopticError> {
    let indices: Vec<usize> = match &options.tables {
        Some(selected) => selected.clone(),
        None => (0..document.tables.len()).collect(),
    };

    let mut used: HashMap<String, usize> = HashMap::new();
    let mut plans = Vec::with_capacity(indices.len());
    for table_index in indices {
        let table = document.table(table_index)?;
        let model = &table.model;
        let base = format!("psalm_{:03}", table.number);

        let views: Vec<(String, View)> = match options.grouping {
            Grouping::PerTable => vec![(base.clone(), View::full(model))],
            Grouping::PerClosure => closure_groups(model)
                .into_iter()
                .map(|group| {
                    let name = format!("{base}_{}", sanitize_ids(&group));
                    let ids: BTreeSet<String> = group.into_iter().collect();
                    (name, View::select(model, &ids))
                })
                .collect(),
        };

        let requests = views
            .into_iter()
            .enumerate()
            .map(|(position, (name, view))| {
                let name = unique_name(&mut used, name);
                let show_header = options.legend.shows_header(&name, position);
                DiagramRequest { name, view, show_header }
            })
            .collect();
        plans.push(TablePlan { table_index, requests });
    }
    Ok(plans)
}

/// Render and write every planned diagram plus the manifest.
///
/// # Errors
///
/// Any planning error, or [`SynopticError::Io`] when the output directory or
/// a file cannot be written.
pub fn export(
    document: &ParsedDocument,
    config: &DiagramConfig,
    options: &ExportOptions,
    out_dir: &Path,
) -> Result<Vec<ExportEntry>, SynopticError> {
    let plans = plan(document, options)?;
    std::fs::create_dir_all(out_dir)?;

    let mut entries = Vec::new();
    for table_plan in &plans {
        let table = document.table(table_plan.table_index)?;
        let scenes = compose_batch(&table.model, &table_plan.requests, config, &table.subject);
        for (request, (name, scene)) in table_plan.requests.iter().zip(scenes) {
            let file = format!("{name}.svg");
            let svg = render_svg(&scene, config.pixel_scale())?;
            std::fs::write(out_dir.join(&file), svg)?;
            tracing::info!(%file, subject = %table.subject, header = request.show_header, "exported diagram");
            entries.push(ExportEntry {
                name,
                file,
                subject: table.subject.clone(),
                ids: request.view.visible_ids.clone(),
                show_header: request.show_header,
            });
        }
    }

    let manifest = serde_json::to_string_pretty(&entries)?;
    std::fs::write(out_dir.join(MANIFEST_FILE), manifest)?;
    tracing::info!(dir = %out_dir.display(), diagrams = entries.len(), "export complete");
    Ok(entries)
}

/// Join ids with `-`, keeping only ASCII alphanumerics of each id.
fn sanitize_ids(ids: &[String]) -> String {
    ids.iter()
        .map(|id| id.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn unique_name(used: &mut HashMap<String, usize>, name: String) -> String {
    let count = used.entry(name.clone()).or_insert(0);
    *count += 1;
    if *count == 1 { name } else { format!("{name}_{count}") }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
