//! End-to-end report rendering

use std::path::{Path, PathBuf};

use reportgen_core::{build_plan, DataRow, OutputTarget, ReportSpec};

use crate::error::{Error, Result};
use crate::metadata::{resolve_report, WorkbookMetadata};
use crate::render::renderer_for;
use crate::sink::{output_file_name, DocumentSink};
use crate::source::load_rows;

/// Default metadata workbook name
pub const DEFAULT_METADATA_FILE: &str = "Formatter Metadata.xlsx";

/// Where metadata comes from and where documents go
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Metadata workbook
    pub metadata_path: PathBuf,
    /// Directory that receives the rendered document
    pub output_dir: PathBuf,
    /// Data source to use instead of the one declared in metadata
    pub source_override: Option<PathBuf>,
    /// Output kind to use instead of the declared `Output Target`
    pub target_override: Option<OutputTarget>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            metadata_path: PathBuf::from(DEFAULT_METADATA_FILE),
            output_dir: PathBuf::from("."),
            source_override: None,
            target_override: None,
        }
    }
}

/// What a successful render produced
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    /// Path of the written document
    pub path: PathBuf,
    pub target: OutputTarget,
    /// Data rows read from the source
    pub row_count: usize,
}

/// Render a report by name: resolve metadata, load the data source, build
/// the plan and write the document
pub fn render_report(report_name: &str, options: &RenderOptions) -> Result<RenderedReport> {
    let metadata = WorkbookMetadata::open(&options.metadata_path)?;
    let mut spec = resolve_report(&metadata, report_name)?;
    if let Some(target) = options.target_override {
        spec.output_target = target;
    }

    let source = data_source_path(
        &spec,
        options.source_override.as_deref(),
        metadata.base_dir(),
    )?;
    log::info!("Using data source {}", source.display());
    let rows = load_rows(&source)?;

    render_rows(&spec, &rows, &options.output_dir)
}

/// Render already loaded rows for a resolved report into `output_dir`
pub fn render_rows(
    spec: &ReportSpec,
    rows: &[DataRow],
    output_dir: &Path,
) -> Result<RenderedReport> {
    let plan = build_plan(spec, rows)?;
    let renderer = renderer_for(spec.output_target);
    let sink = DocumentSink::new(output_dir);

    let file_name = output_file_name(&spec.name, renderer.target());
    let path = sink.write_with(&file_name, |file| renderer.render(&plan, spec, file))?;

    log::info!("Generated {}", path.display());
    Ok(RenderedReport {
        path,
        target: renderer.target(),
        row_count: rows.len(),
    })
}

/// The override wins; a relative declared source is taken relative to the
/// metadata workbook
fn data_source_path(
    spec: &ReportSpec,
    source_override: Option<&Path>,
    base_dir: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = source_override {
        return Ok(path.to_path_buf());
    }

    let declared = spec
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::MissingSource(spec.name.clone()))?;
    let declared = Path::new(declared);

    Ok(match base_dir {
        Some(base) if declared.is_relative() => base.join(declared),
        _ => declared.to_path_buf(),
    })
}
