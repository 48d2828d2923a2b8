use std::fs;
use std::path::Path;

use bw_build::{Builder, ImageOptions, ScaleSuggestion};
use bw_config::Config;
use bw_images::{ConvertError, ExportFormat, ImageConverter};
use pretty_assertions::assert_eq;

/// Writes the format name into the output, or fails without writing.
#[derive(Default)]
struct FakeConverter {
    fail: bool,
}

impl FakeConverter {
    fn failing() -> Self {
        Self { fail: true }
    }
}

impl ImageConverter for FakeConverter {
    fn convert(
        &self,
        _source: &Path,
        output: &Path,
        format: ExportFormat,
    ) -> Result<(), ConvertError> {
        if self.fail {
            return Err(ConvertError::MissingOutput {
                program: "fake".to_owned(),
                output: output.to_path_buf(),
            });
        }
        fs::write(output, format!("{format:?}")).unwrap();
        Ok(())
    }
}

/// One chapter with a vector figure, a raster-only figure, a vendored
/// figure and the typeset LaTeX of the chapter.
fn create_book(root: &Path) -> Config {
    fs::write(
        root.join("bw.toml"),
        "[sources]\nroot = \"code\"\n\n[images]\nscreen_dpi = 96\n",
    )
    .unwrap();

    fs::create_dir_all(root.join("code/doc-files")).unwrap();
    fs::write(root.join("code/doc-files/Pipe.png"), "png").unwrap();

    let chapter = root.join("pre-markdown/ch1");
    fs::create_dir_all(&chapter).unwrap();
    fs::write(
        chapter.join("pumps.md"),
        "# Pumps\n\n{@img pump.png}{A pump}{0.45}\n\n{@img photo.jpg}{A photo}{0.3}\n\n{@img doc-files/Pipe.png}{A pipe}{0.2}\n",
    )
    .unwrap();
    fs::write(chapter.join("pump.svg"), r#"<svg width="200mm"></svg>"#).unwrap();
    fs::write(chapter.join("pump.png"), "stale png").unwrap();
    fs::write(chapter.join("photo.jpg"), "jpg").unwrap();
    fs::write(chapter.join("notes.md"), "No figures here.\n").unwrap();

    let latex = root.join("latex/chapters/ch1");
    fs::create_dir_all(&latex).unwrap();
    fs::write(
        latex.join("pumps.tex"),
        "\\includegraphics{ch1/pump.png}\n\\includegraphics{ch1/photo.jpg}\n\\includegraphics{Pipe.png}\n",
    )
    .unwrap();

    Config::load(Some(&root.join("bw.toml")), None).unwrap()
}

#[test]
fn test_convert_images_produces_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = create_book(root);
    let builder = Builder::new(&config)
        .unwrap()
        .with_converter(FakeConverter::default());

    let report = builder.convert_images(&ImageOptions::default()).unwrap();

    assert!(report.is_clean(), "unexpected failures: {report:?}");
    assert_eq!(report.documents, 2);
    assert_eq!(report.run.converted, 2);
    assert_eq!(report.run.copied, 4);
    assert_eq!(report.latex_rewritten, 1);

    assert_eq!(
        fs::read_to_string(root.join("latex/chapters/ch1/pump.pdf")).unwrap(),
        "Pdf"
    );
    assert_eq!(
        fs::read_to_string(root.join("markdown/ch1/pump.png")).unwrap(),
        "Png { dpi: 96 }"
    );
    assert_eq!(
        fs::read_to_string(root.join("markdown/ch1/photo.jpg")).unwrap(),
        "jpg"
    );
    assert_eq!(
        fs::read_to_string(root.join("latex/chapters/ch1/Pipe.png")).unwrap(),
        "png"
    );
    assert_eq!(
        fs::read_to_string(root.join("latex/chapters/ch1/pumps.tex")).unwrap(),
        "\\scalebox{0.45}{\\includegraphics{ch1/pump.pdf}}\n\\scalebox{0.3}{\\includegraphics{ch1/photo.jpg}}\n\\scalebox{0.2}{\\includegraphics{Pipe.png}}\n"
    );
}

#[test]
fn test_second_run_is_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let config = create_book(dir.path());
    let builder = Builder::new(&config)
        .unwrap()
        .with_converter(FakeConverter::default());
    builder.convert_images(&ImageOptions::default()).unwrap();

    let report = builder.convert_images(&ImageOptions::default()).unwrap();
    assert_eq!(report.run.converted, 0);
    assert_eq!(report.run.copied, 0);
    assert_eq!(report.run.up_to_date, 6);
    assert_eq!(report.latex_rewritten, 0);

    let forced = builder.convert_images(&ImageOptions { force: true }).unwrap();
    assert_eq!(forced.run.converted, 2);
    assert_eq!(forced.run.copied, 4);
}

#[test]
fn test_failing_converter_leaves_artifact_absent() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = create_book(root);
    let builder = Builder::new(&config)
        .unwrap()
        .with_converter(FakeConverter::failing());

    let report = builder.convert_images(&ImageOptions::default()).unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.run.failed.len(), 2);
    assert_eq!(report.run.copied, 4);
    assert!(!root.join("latex/chapters/ch1/pump.pdf").exists());
    assert!(!root.join("markdown/ch1/pump.png").exists());
    assert!(root.join("markdown/ch1/photo.jpg").exists());
}

#[test]
fn test_suggest_scales() {
    let dir = tempfile::tempdir().unwrap();
    let config = create_book(dir.path());
    let builder = Builder::new(&config).unwrap();

    let suggestions = builder
        .suggest_scales(&dir.path().join("pre-markdown/ch1/pumps.md"))
        .unwrap();

    assert_eq!(
        suggestions,
        vec![ScaleSuggestion {
            image: "pump.png".to_owned(),
            current: "0.45".to_owned(),
            current_value: Some(0.45),
            suggested: 0.45,
        }]
    );
    assert!(suggestions[0].is_current());
}

#[test]
fn test_suggest_scales_with_non_numeric_scale() {
    let dir = tempfile::tempdir().unwrap();
    let config = create_book(dir.path());
    let chapter = dir.path().join("pre-markdown/ch1");
    fs::write(
        chapter.join("wide.md"),
        "{@img pump.png}{Wide}{0.5\\textwidth}\n{@img pump.png}{Bare}{}\n",
    )
    .unwrap();
    let builder = Builder::new(&config).unwrap();

    let suggestions = builder.suggest_scales(&chapter.join("wide.md")).unwrap();

    let current: Vec<(&str, Option<f64>)> = suggestions
        .iter()
        .map(|s| (s.current.as_str(), s.current_value))
        .collect();
    assert_eq!(current, vec![("0.5\\textwidth", None), ("", None)]);
    assert!(suggestions.iter().all(|s| !s.is_current()));
}

#[test]
fn test_suggest_scales_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = create_book(dir.path());
    let builder = Builder::new(&config).unwrap();

    assert!(builder.suggest_scales(&dir.path().join("nope.md")).is_err());
}
