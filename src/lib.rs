mod error;
mod fonts;
pub mod format;
mod model;
mod pdf;
mod report;

pub use error::{Error, Result};
pub use fonts::FontStyle;
pub use model::{
    ApplicantProfile, DocumentStatus, EligibilityCalculations, EligibilityResult, FormStatus,
    ObligationRecord, ReportBundle, SalaryAnalysis, SalarySlip, UploadedDocument,
    active_obligations_total,
};
pub use pdf::{PlacedText, RenderedPage, Rgb};
pub use report::{DEFAULT_OUTPUT, RenderOptions, RenderedReport, ReportRenderer, render_report};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Load a JSON bundle from `input` and render it to `output`.
pub fn convert_bundle_file(input: &Path, output: &Path, options: RenderOptions) -> Result<PathBuf> {
    let t0 = Instant::now();

    let file = std::fs::File::open(input).map_err(|source| Error::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let bundle = ReportBundle::from_json_reader(std::io::BufReader::new(file))?;
    let t_parse = t0.elapsed();

    let written = ReportRenderer::new(options).render_to_path(&bundle, output)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render+write={:.1}ms, total={:.1}ms",
        t_parse.as_secs_f64() * 1000.0,
        (t_total - t_parse).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
    );

    Ok(written)
}
