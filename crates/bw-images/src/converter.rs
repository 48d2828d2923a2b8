//! External vector converter.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::consts::DEFAULT_INKSCAPE;
use crate::error::ConvertError;
use crate::plan::ExportFormat;

/// Turns a vector source into a PDF or PNG file.
///
/// Implementations must be shareable across threads; artifacts are
/// converted in parallel.
pub trait ImageConverter: Send + Sync {
    /// Convert `source` into `output` in the requested format.
    ///
    /// The parent directory of `output` already exists.
    fn convert(&self, source: &Path, output: &Path, format: ExportFormat)
    -> Result<(), ConvertError>;
}

/// Command-line flavour of Inkscape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InkscapeFlavor {
    /// 0.9x: `-z --file=IN --export-pdf=OUT`
    #[default]
    Legacy,
    /// 1.x: `IN --export-type=pdf --export-filename=OUT`
    Modern,
}

/// [`ImageConverter`] backed by the Inkscape command-line interface.
#[derive(Clone, Debug)]
pub struct InkscapeConverter {
    program: String,
    flavor: InkscapeFlavor,
}

impl Default for InkscapeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_INKSCAPE)
    }
}

impl InkscapeConverter {
    /// Create a converter invoking `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flavor: InkscapeFlavor::default(),
        }
    }

    /// Select the command-line flavour.
    #[must_use]
    pub fn with_flavor(mut self, flavor: InkscapeFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Program this converter invokes.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program for one conversion.
    #[must_use]
    pub fn args(&self, source: &Path, output: &Path, format: ExportFormat) -> Vec<OsString> {
        match self.flavor {
            InkscapeFlavor::Legacy => {
                let mut args = vec![OsString::from("-z"), prefixed("--file=", source)];
                match format {
                    ExportFormat::Pdf => args.push(prefixed("--export-pdf=", output)),
                    ExportFormat::Png { dpi } => {
                        args.push(OsString::from("--export-dpi"));
                        args.push(OsString::from(dpi.to_string()));
                        args.push(prefixed("--export-png=", output));
                    }
                }
                args
            }
            InkscapeFlavor::Modern => {
                let mut args = vec![source.as_os_str().to_owned()];
                match format {
                    ExportFormat::Pdf => args.push(OsString::from("--export-type=pdf")),
                    ExportFormat::Png { dpi } => {
                        args.push(OsString::from("--export-type=png"));
                        args.push(OsString::from(format!("--export-dpi={dpi}")));
                    }
                }
                args.push(prefixed("--export-filename=", output));
                args
            }
        }
    }
}

impl ImageConverter for InkscapeConverter {
    fn convert(
        &self,
        source: &Path,
        output: &Path,
        format: ExportFormat,
    ) -> Result<(), ConvertError> {
        tracing::debug!(
            program = %self.program,
            source = %source.display(),
            output = %output.display(),
            "Converting image"
        );
        let result = Command::new(&self.program)
            .args(self.args(source, output, format))
            .output()
            .map_err(|e| ConvertError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !result.status.success() {
            return Err(ConvertError::Failed {
                program: self.program.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }
        if !output.exists() {
            return Err(ConvertError::MissingOutput {
                program: self.program.clone(),
                output: output.to_path_buf(),
            });
        }
        Ok(())
    }
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_legacy_pdf_args() {
        let converter = InkscapeConverter::default();
        let args = converter.args(Path::new("a.svg"), Path::new("out/a.pdf"), ExportFormat::Pdf);
        assert_eq!(strings(args), vec!["-z", "--file=a.svg", "--export-pdf=out/a.pdf"]);
    }

    #[test]
    fn test_legacy_png_args() {
        let converter = InkscapeConverter::default();
        let args = converter.args(
            Path::new("a.svg"),
            Path::new("out/a.png"),
            ExportFormat::Png { dpi: 64 },
        );
        assert_eq!(
            strings(args),
            vec!["-z", "--file=a.svg", "--export-dpi", "64", "--export-png=out/a.png"]
        );
    }

    #[test]
    fn test_modern_args() {
        let converter = InkscapeConverter::new("inkscape").with_flavor(InkscapeFlavor::Modern);
        let pdf = converter.args(Path::new("a.svg"), Path::new("a.pdf"), ExportFormat::Pdf);
        assert_eq!(
            strings(pdf),
            vec!["a.svg", "--export-type=pdf", "--export-filename=a.pdf"]
        );
        let png = converter.args(
            Path::new("a.svg"),
            Path::new("a.png"),
            ExportFormat::Png { dpi: 96 },
        );
        assert_eq!(
            strings(png),
            vec!["a.svg", "--export-type=png", "--export-dpi=96", "--export-filename=a.png"]
        );
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let converter = InkscapeConverter::new("bw-no-such-converter-program");
        let err = converter
            .convert(Path::new("a.svg"), Path::new("a.pdf"), ExportFormat::Pdf)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Spawn { .. }));
        assert!(err.to_string().contains("bw-no-such-converter-program"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let converter = InkscapeConverter::new("false");
        let err = converter
            .convert(Path::new("a.svg"), Path::new("a.pdf"), ExportFormat::Pdf)
            .unwrap_err();
        let ConvertError::Failed { program, status, .. } = &err else {
            panic!("expected a failed conversion, got {err:?}");
        };
        assert_eq!(program, "false");
        assert!(!status.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_success_without_output_is_missing_output() {
        let converter = InkscapeConverter::new("true");
        let output = Path::new("/nonexistent/bw-converter-test/a.pdf");
        let err = converter
            .convert(Path::new("a.svg"), output, ExportFormat::Pdf)
            .unwrap_err();
        assert!(matches!(err, ConvertError::MissingOutput { .. }));
    }
}
