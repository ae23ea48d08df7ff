//! Typst report generation.
//!
//! Reads a Typst template (the built-in default or a custom file), resolves
//! every `{{PLACEHOLDER}}` with markup from `chart_svg` and `tables`, and
//! writes the final `.typ` file.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use crate::domain::error::RotagraphError;
use crate::ports::report_port::{ReportContext, ReportPort};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve all `{{PLACEHOLDER}}`s in the given template string and return
/// the final Typst markup ready to be written to a `.typ` file.
pub fn resolve(template: &str, ctx: &ReportContext) -> String {
    let mut output = template.to_string();

    let settings = tables::render_settings_summary(ctx.settings, ctx.benchmark, ctx.snapshot.as_of);
    output = output.replace("{{SETTINGS_SUMMARY}}", &settings);

    let snapshot = tables::render_quadrant_snapshot(&ctx.snapshot.counts);
    output = output.replace("{{QUADRANT_SNAPSHOT}}", &snapshot);

    // Chart SVG wrapped in Typst image.decode
    let rrg_svg = chart_svg::generate_rrg_svg(&ctx.snapshot.tails);
    let rrg_typst = if rrg_svg.is_empty() {
        "_No rotation data._".to_string()
    } else {
        format!(
            "#image.decode(\n\"{}\",\n  width: 100%,\n)",
            rrg_svg.replace('\\', "\\\\").replace('"', "\\\"")
        )
    };
    output = output.replace("{{RRG_CHART_SVG}}", &rrg_typst);

    let ranking = tables::render_ranking_table(&ctx.snapshot.rows);
    output = output.replace("{{RANKING_TABLE}}", &ranking);

    let tails = tables::render_tail_table(&ctx.snapshot.tails);
    output = output.replace("{{TAIL_TABLE}}", &tails);

    let skipped = tables::render_skipped_sectors(ctx.skipped, &ctx.snapshot.unclassified);
    output = output.replace("{{SKIPPED_SECTORS}}", &skipped);

    output
}

/// Writes `.typ` reports from the default template or a custom one.
pub struct TypstReportAdapter {
    template_path: Option<PathBuf>,
    include_tails: bool,
}

impl TypstReportAdapter {
    pub fn new(template_path: Option<PathBuf>) -> Self {
        Self {
            template_path,
            include_tails: true,
        }
    }

    pub fn with_tails(mut self, include_tails: bool) -> Self {
        self.include_tails = include_tails;
        self
    }

    fn load_template(&self) -> Result<String, RotagraphError> {
        match &self.template_path {
            Some(path) => fs::read_to_string(path).map_err(|e| RotagraphError::Report {
                reason: format!("failed to read template {}: {}", path.display(), e),
            }),
            None => Ok(default_template::template().to_string()),
        }
    }
}

impl ReportPort for TypstReportAdapter {
    fn write(&self, ctx: &ReportContext, output_path: &str) -> Result<(), RotagraphError> {
        let mut template = self.load_template()?;
        if !self.include_tails {
            template = template.replace("{{TAIL_TABLE}}", "_Tails omitted._");
        }
        let content = resolve(&template, ctx);

        let path = Path::new(output_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content).map_err(|e| RotagraphError::Report {
            reason: format!("failed to write report {}: {}", path.display(), e),
        })?;

        tracing::info!(path = %path.display(), "report written");
        Ok(())
    }
}
