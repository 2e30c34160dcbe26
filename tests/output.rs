mod common;

use std::io::{self, Write};

use common::{fixed_options, fixture, render, renderer};
use loan_report_pdf::{
    DEFAULT_OUTPUT, Error, RenderOptions, ReportBundle, ReportRenderer, convert_bundle_file,
};

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn eligible_bundle() -> ReportBundle {
    let mut bundle = ReportBundle::default();
    bundle.eligibility.eligible = true;
    bundle.eligibility.calculations.approved_loan_amount = Some(500000.0);
    bundle
}

#[test]
fn render_to_path_writes_the_rendered_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("report.pdf");
    let bundle = eligible_bundle();

    let written = renderer().render_to_path(&bundle, &dest).unwrap();
    assert_eq!(written, dest);

    let on_disk = std::fs::read(&dest).unwrap();
    assert!(on_disk.starts_with(b"%PDF-"));
    assert_eq!(on_disk, render(&bundle).bytes);
}

#[test]
fn render_to_path_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join(DEFAULT_OUTPUT);
    std::fs::write(&dest, b"stale").unwrap();

    renderer().render_to_path(&ReportBundle::default(), &dest).unwrap();
    let on_disk = std::fs::read(&dest).unwrap();
    assert!(on_disk.starts_with(b"%PDF-"));
}

#[test]
fn unwritable_destination_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("missing").join("report.pdf");

    let err = renderer()
        .render_to_path(&ReportBundle::default(), &dest)
        .unwrap_err();
    match &err {
        Error::Io { path, source } => {
            assert_eq!(path.as_deref(), Some(dest.as_path()));
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("report.pdf"), "{err}");
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn writer_failures_surface_as_io_errors() {
    let err = renderer()
        .render_to_writer(&ReportBundle::default(), FailingWriter)
        .unwrap_err();
    assert!(matches!(err, Error::Io { path: None, .. }), "{err:?}");
    assert_eq!(err.to_string(), "cannot write report: pipe closed");
}

#[test]
fn render_to_writer_matches_in_memory_render() {
    let mut buf = Vec::new();
    let report = renderer().render_to_writer(&eligible_bundle(), &mut buf).unwrap();
    assert_eq!(buf, report.bytes);
    assert!(report.contains("ELIGIBLE FOR LOAN"));
}

#[test]
fn output_is_deterministic_for_a_fixed_timestamp() {
    let bundle = eligible_bundle();
    let first = render(&bundle);
    let second = render(&bundle);
    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.pages, second.pages);
}

#[test]
fn uncompressed_streams_show_text_operators() {
    let options = RenderOptions {
        compress: false,
        ..fixed_options()
    };
    let plain = ReportRenderer::new(options).render(&eligible_bundle());
    assert!(contains_bytes(&plain.bytes, b"(ELIGIBLE FOR LOAN) Tj"));
    assert!(contains_bytes(&plain.bytes, b"/Helvetica-Bold"));
    assert!(contains_bytes(&plain.bytes, b"/WinAnsiEncoding"));

    let compressed = render(&eligible_bundle());
    assert!(contains_bytes(&compressed.bytes, b"/FlateDecode"));
    assert!(!contains_bytes(&compressed.bytes, b"(ELIGIBLE FOR LOAN)"));
    assert!(compressed.bytes.len() < plain.bytes.len());
}

#[test]
fn document_info_carries_title_and_timestamp() {
    let report = render(&ReportBundle::default());
    assert!(contains_bytes(&report.bytes, b"(LOAN APPLICATION ANALYSIS REPORT)"));
    assert!(contains_bytes(&report.bytes, b"D:20261018154500"));
    assert!(contains_bytes(&report.bytes, b"/Producer"));
}

#[test]
fn custom_title_is_used_on_every_page() {
    let options = RenderOptions {
        title: "HOME LOAN FILE REVIEW".to_string(),
        ..fixed_options()
    };
    let bundle = ReportBundle {
        queries: (0..150).map(|i| format!("Query {i}")).collect(),
        ..ReportBundle::default()
    };
    let report = ReportRenderer::new(options).render(&bundle);
    assert!(report.page_count() > 1);
    for page in &report.pages {
        assert_eq!(page.texts[0].text, "HOME LOAN FILE REVIEW");
    }
    assert!(!report.contains("LOAN APPLICATION ANALYSIS REPORT"));
}

#[test]
fn long_title_wraps_inside_the_margins() {
    let title = "HOME LOAN FILE REVIEW FOR THE JOINT APPLICATION OF PRIYA SHARMA AND RAHUL SHARMA \
                 WITH CO-BORROWER INCOME CONSIDERED";
    let options = RenderOptions {
        title: title.to_string(),
        ..fixed_options()
    };
    let renderer = ReportRenderer::new(options);
    assert_eq!(renderer.options().title, title);
    let bundle = ReportBundle {
        queries: (0..150).map(|i| format!("Query {i}")).collect(),
        ..ReportBundle::default()
    };
    let report = renderer.render(&bundle);
    let margin = 10.0 * 72.0 / 25.4;

    for page in &report.pages {
        let heading: Vec<_> = page.texts.iter().take_while(|t| t.font_size == 16.0).collect();
        assert!(heading.len() >= 2, "title did not wrap on page {}", page.number);
        let rejoined = heading.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ");
        assert_eq!(rejoined, title);
        for line in &heading {
            assert!(line.x >= margin, "{:?} starts left of the margin", line.text);
        }
        let body = &page.texts[heading.len()];
        assert!(body.baseline > heading.last().unwrap().baseline);
        assert_eq!(page.texts.last().unwrap().text, format!("Page {}", page.number));
    }
}

#[test]
fn characters_outside_winansi_become_question_marks() {
    let options = RenderOptions {
        compress: false,
        ..fixed_options()
    };
    let mut bundle = ReportBundle::default();
    bundle.applicant.applicant_name = Some("Priya \u{20b9}".to_string());
    let report = ReportRenderer::new(options).render(&bundle);

    // the page record keeps the unsubstituted text
    assert_eq!(
        common::field_values(&report, "Applicant Name"),
        ["Priya \u{20b9}"]
    );
    assert!(contains_bytes(&report.bytes, b"(Priya ?) Tj"));
}

#[test]
fn render_report_uses_default_options() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("default.pdf");
    let written = loan_report_pdf::render_report(&ReportBundle::default(), &dest).unwrap();
    assert_eq!(written, dest);
    assert!(std::fs::read(&dest).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn convert_bundle_file_renders_the_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("sample.pdf");
    let written = convert_bundle_file(&fixture("sample_bundle.json"), &dest, fixed_options()).unwrap();
    assert_eq!(written, dest);

    let json = std::fs::read_to_string(fixture("sample_bundle.json")).unwrap();
    let bundle = ReportBundle::from_json_str(&json).unwrap();
    assert_eq!(std::fs::read(&dest).unwrap(), render(&bundle).bytes);
}

#[test]
fn missing_input_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.json");
    let err = convert_bundle_file(&input, &dir.path().join("out.pdf"), fixed_options()).unwrap_err();
    match &err {
        Error::Read { path, .. } => assert_eq!(path, &input),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("cannot read report bundle"), "{err}");
    assert!(!dir.path().join("out.pdf").exists());
}

#[test]
fn malformed_input_is_a_bundle_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    std::fs::write(&input, "{\"applicant\": {\"applicant_name\": ").unwrap();
    let err = convert_bundle_file(&input, &dir.path().join("out.pdf"), fixed_options()).unwrap_err();
    assert!(matches!(err, Error::Bundle(_)), "{err:?}");
    assert!(!dir.path().join("out.pdf").exists());
}
