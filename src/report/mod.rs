mod chrome;
mod sections;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::model::ReportBundle;
use crate::pdf::{self, DocumentInfo, RenderedPage};

use chrome::ReportChrome;

/// Default destination when the caller does not choose one.
pub const DEFAULT_OUTPUT: &str = "loan_analysis_report.pdf";

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Banner printed at the top of every page.
    pub title: String,
    /// Timestamp for the "Generated on" line and the document info.
    /// `None` reads the local clock at render time.
    pub generated_at: Option<NaiveDateTime>,
    /// Flate-compress page content streams.
    pub compress: bool,
    /// Policy ceiling shown next to the applicant's age figures.
    pub max_age_limit: u32,
    /// Policy ceiling shown next to the FOIR figures.
    pub max_foir_percent: f64,
    /// Shown as the applicant's employment type.
    pub employment_type: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "LOAN APPLICATION ANALYSIS REPORT".to_string(),
            generated_at: None,
            compress: true,
            max_age_limit: 60,
            max_foir_percent: 60.0,
            employment_type: "Salaried".to_string(),
        }
    }
}

/// A finished document together with a record of what each page shows.
#[derive(Clone, Debug)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub pages: Vec<RenderedPage>,
}

impl RenderedReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text of every page, pages separated by a form feed.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(RenderedPage::text)
            .collect::<Vec<_>>()
            .join("\n\x0c\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.pages.iter().any(|p| p.contains(needle))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ReportRenderer {
    options: RenderOptions,
}

impl ReportRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Lay out and serialize the whole report in memory.
    pub fn render(&self, bundle: &ReportBundle) -> RenderedReport {
        let generated_at = self
            .options
            .generated_at
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        let info = DocumentInfo {
            title: &self.options.title,
            created: generated_at,
            compress: self.options.compress,
        };
        let chrome = ReportChrome::new(&self.options.title);

        let (bytes, pages) = pdf::write_document(&info, &chrome, |flow| {
            sections::render_body(flow, bundle, &self.options, &generated_at);
        });
        RenderedReport { bytes, pages }
    }

    /// Render and write the document to `writer`, flushing before returning.
    pub fn render_to_writer<W: Write>(&self, bundle: &ReportBundle, mut writer: W) -> Result<RenderedReport> {
        let report = self.render(bundle);
        writer
            .write_all(&report.bytes)
            .and_then(|()| writer.flush())
            .map_err(Error::io(None))?;
        Ok(report)
    }

    /// Render and write the document to a file at `destination`, returning the path written.
    pub fn render_to_path(&self, bundle: &ReportBundle, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let path = destination.as_ref().to_path_buf();
        let report = self.render(bundle);

        let file = File::create(&path).map_err(Error::io(Some(path.clone())))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&report.bytes)
            .and_then(|()| writer.flush())
            .map_err(Error::io(Some(path.clone())))?;
        writer
            .into_inner()
            .map_err(|e| e.into_error())
            .and_then(|file| file.sync_all())
            .map_err(Error::io(Some(path.clone())))?;

        log::info!("Wrote {} ({} pages, {} bytes)", path.display(), report.page_count(), report.bytes.len());
        Ok(path)
    }
}

/// Render `bundle` with default options to `destination`.
pub fn render_report(bundle: &ReportBundle, destination: impl AsRef<Path>) -> Result<PathBuf> {
    ReportRenderer::default().render_to_path(bundle, destination)
}
