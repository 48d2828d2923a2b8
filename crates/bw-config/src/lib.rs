//! Configuration management for bookweave.
//!
//! Parses `bw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Relative paths are
//! resolved against the directory holding the config file.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `sources.remote_url`
//! - `apidocs.root`
//! - `images.converter`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the annotated input tree.
    pub input_dir: Option<PathBuf>,
    /// Override the Markdown output tree.
    pub markdown_dir: Option<PathBuf>,
    /// Override the LaTeX output tree.
    pub latex_dir: Option<PathBuf>,
    /// Override the origin source tree.
    pub source_root: Option<PathBuf>,
    /// Override the image converter program.
    pub converter: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bw.toml";

/// Upper bound for `images.screen_dpi`.
const MAX_DPI: u32 = 1000;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Book tree configuration (paths are relative strings from TOML).
    book: BookConfigRaw,
    /// Origin source configuration (paths are relative strings from TOML).
    sources: SourcesConfigRaw,
    /// API documentation configuration.
    pub apidocs: ApidocsConfig,
    /// Image conversion configuration.
    images: ImagesConfigRaw,

    /// Resolved book configuration (set after loading).
    #[serde(skip)]
    pub book_resolved: BookConfig,
    /// Resolved source configuration (set after loading).
    #[serde(skip)]
    pub sources_resolved: SourcesConfig,
    /// Resolved image configuration (set after loading).
    #[serde(skip)]
    pub images_resolved: ImagesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw book configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BookConfigRaw {
    input_dir: Option<String>,
    markdown_dir: Option<String>,
    latex_dir: Option<String>,
    document_extension: Option<String>,
    ignore: Option<Vec<String>>,
}

/// Resolved book configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BookConfig {
    /// Annotated Markdown tree.
    pub input_dir: PathBuf,
    /// Web-book Markdown output tree.
    pub markdown_dir: PathBuf,
    /// LaTeX output tree.
    pub latex_dir: PathBuf,
    /// Extension of documents whose directives are resolved. Other files
    /// are copied through.
    pub document_extension: String,
    /// Glob patterns of input files to skip.
    pub ignore: Vec<String>,
}

/// Raw source configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourcesConfigRaw {
    root: Option<String>,
    remote_url: Option<String>,
    language: Option<String>,
    strip_comments: Option<bool>,
}

/// Resolved origin source configuration.
#[derive(Debug, Default)]
pub struct SourcesConfig {
    /// Local copy of the source tree snippets are extracted from.
    pub root: PathBuf,
    /// URL of the hosted copy of the same tree, for provenance links.
    pub remote_url: String,
    /// Language tag on fenced code blocks.
    pub language: String,
    /// Whether comments are removed from marked snippets.
    pub strip_comments: bool,
}

/// API documentation configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApidocsConfig {
    /// Base URL cross-references resolve under.
    pub root: String,
}

/// Command-line flavour of the image converter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterFlavor {
    /// Inkscape 0.9x flags.
    #[default]
    Legacy,
    /// Inkscape 1.x flags.
    Modern,
}

/// Raw image configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ImagesConfigRaw {
    converter: Option<String>,
    flavor: Option<ConverterFlavor>,
    screen_dpi: Option<u32>,
    vendored_prefix: Option<String>,
}

/// Resolved image conversion configuration.
#[derive(Debug)]
pub struct ImagesConfig {
    /// Converter program.
    pub converter: String,
    /// Converter command-line flavour.
    pub flavor: ConverterFlavor,
    /// DPI of PNG exports for the web-book.
    pub screen_dpi: u32,
    /// Image paths with this prefix are read from the source tree.
    pub vendored_prefix: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            converter: "inkscape".to_owned(),
            flavor: ConverterFlavor::Legacy,
            screen_dpi: 64,
            vendored_prefix: "doc-files".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`sources.remote_url`").
        field: String,
        /// Error message (e.g., "${`SOURCE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field, when set, to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `bw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(input_dir) = &settings.input_dir {
            self.book_resolved.input_dir.clone_from(input_dir);
        }
        if let Some(markdown_dir) = &settings.markdown_dir {
            self.book_resolved.markdown_dir.clone_from(markdown_dir);
        }
        if let Some(latex_dir) = &settings.latex_dir {
            self.book_resolved.latex_dir.clone_from(latex_dir);
        }
        if let Some(source_root) = &settings.source_root {
            self.sources_resolved.root.clone_from(source_root);
        }
        if let Some(converter) = &settings.converter {
            self.images_resolved.converter.clone_from(converter);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            book: BookConfigRaw::default(),
            sources: SourcesConfigRaw::default(),
            apidocs: ApidocsConfig::default(),
            images: ImagesConfigRaw::default(),
            book_resolved: BookConfig::default(),
            sources_resolved: SourcesConfig::default(),
            images_resolved: ImagesConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_book()?;
        require_http_url(&self.sources_resolved.remote_url, "sources.remote_url")?;
        require_http_url(&self.apidocs.root, "apidocs.root")?;
        self.validate_images()?;
        Ok(())
    }

    fn validate_book(&self) -> Result<(), ConfigError> {
        let book = &self.book_resolved;
        require_non_empty(&book.document_extension, "book.document_extension")?;
        if book.document_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "book.document_extension must not start with a dot".to_owned(),
            ));
        }
        if book.input_dir == book.markdown_dir {
            return Err(ConfigError::Validation(
                "book.input_dir and book.markdown_dir must differ".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_images(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.images_resolved.converter, "images.converter")?;

        let dpi = self.images_resolved.screen_dpi;
        if dpi == 0 {
            return Err(ConfigError::Validation(
                "images.screen_dpi must be greater than 0".to_owned(),
            ));
        }
        if dpi > MAX_DPI {
            return Err(ConfigError::Validation(format!(
                "images.screen_dpi cannot exceed {MAX_DPI}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.sources.remote_url {
            self.sources.remote_url = Some(expand::expand_env(url, "sources.remote_url")?);
        }
        self.apidocs.root = expand::expand_env(&self.apidocs.root, "apidocs.root")?;
        if let Some(ref converter) = self.images.converter {
            self.images.converter = Some(expand::expand_env(converter, "images.converter")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and fill defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.book_resolved = BookConfig {
            input_dir: resolve(self.book.input_dir.as_deref(), "pre-markdown"),
            markdown_dir: resolve(self.book.markdown_dir.as_deref(), "markdown"),
            latex_dir: resolve(self.book.latex_dir.as_deref(), "latex/chapters"),
            document_extension: self
                .book
                .document_extension
                .clone()
                .unwrap_or_else(|| "md".to_owned()),
            ignore: self
                .book
                .ignore
                .clone()
                .unwrap_or_else(|| vec!["*.md~".to_owned()]),
        };

        self.sources_resolved = SourcesConfig {
            root: resolve(self.sources.root.as_deref(), "src"),
            remote_url: self.sources.remote_url.clone().unwrap_or_default(),
            language: self
                .sources
                .language
                .clone()
                .unwrap_or_else(|| "java".to_owned()),
            strip_comments: self.sources.strip_comments.unwrap_or(true),
        };

        let defaults = ImagesConfig::default();
        self.images_resolved = ImagesConfig {
            converter: self.images.converter.clone().unwrap_or(defaults.converter),
            flavor: self.images.flavor.unwrap_or(defaults.flavor),
            screen_dpi: self.images.screen_dpi.unwrap_or(defaults.screen_dpi),
            vendored_prefix: self
                .images
                .vendored_prefix
                .clone()
                .unwrap_or(defaults.vendored_prefix),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        let book = &config.book_resolved;
        assert_eq!(book.input_dir, PathBuf::from("/test/pre-markdown"));
        assert_eq!(book.markdown_dir, PathBuf::from("/test/markdown"));
        assert_eq!(book.latex_dir, PathBuf::from("/test/latex/chapters"));
        assert_eq!(book.document_extension, "md");
        assert_eq!(book.ignore, vec!["*.md~".to_owned()]);
        assert_eq!(config.sources_resolved.root, PathBuf::from("/test/src"));
        assert_eq!(config.sources_resolved.language, "java");
        assert!(config.sources_resolved.strip_comments);
        assert_eq!(config.images_resolved.converter, "inkscape");
        assert_eq!(config.images_resolved.flavor, ConverterFlavor::Legacy);
        assert_eq!(config.images_resolved.screen_dpi, 64);
        assert_eq!(config.images_resolved.vendored_prefix, "doc-files");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.apidocs.root.is_empty());
        assert!(config.book.input_dir.is_none());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[book]
input_dir = "pre"
markdown_dir = "out/md"
latex_dir = "out/tex"
ignore = ["*.bak", "drafts/*"]

[sources]
root = "../examples/Source/src"
remote_url = "https://github.com/org/repo/blob/master/Source/src/"
language = "kotlin"
strip_comments = false

[images]
flavor = "modern"
screen_dpi = 96
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.book_resolved.input_dir, PathBuf::from("/project/pre"));
        assert_eq!(config.book_resolved.markdown_dir, PathBuf::from("/project/out/md"));
        assert_eq!(config.book_resolved.latex_dir, PathBuf::from("/project/out/tex"));
        assert_eq!(
            config.book_resolved.ignore,
            vec!["*.bak".to_owned(), "drafts/*".to_owned()]
        );
        assert_eq!(
            config.sources_resolved.root,
            PathBuf::from("/project/../examples/Source/src")
        );
        assert_eq!(config.sources_resolved.language, "kotlin");
        assert!(!config.sources_resolved.strip_comments);
        assert_eq!(config.images_resolved.flavor, ConverterFlavor::Modern);
        assert_eq!(config.images_resolved.screen_dpi, 96);
        assert_eq!(config.images_resolved.converter, "inkscape");
    }

    #[test]
    fn test_unknown_flavor_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[images]\nflavor = \"ancient\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            input_dir: Some(PathBuf::from("/in")),
            latex_dir: Some(PathBuf::from("/tex")),
            source_root: Some(PathBuf::from("/code")),
            converter: Some("/opt/inkscape/bin/inkscape".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.book_resolved.input_dir, PathBuf::from("/in"));
        assert_eq!(config.book_resolved.markdown_dir, PathBuf::from("/test/markdown")); // Unchanged
        assert_eq!(config.book_resolved.latex_dir, PathBuf::from("/tex"));
        assert_eq!(config.sources_resolved.root, PathBuf::from("/code"));
        assert_eq!(config.images_resolved.converter, "/opt/inkscape/bin/inkscape");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.book_resolved.input_dir, PathBuf::from("/test/pre-markdown"));
        assert_eq!(config.sources_resolved.root, PathBuf::from("/test/src"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("BW_TEST_CONFIG_ORG", "liflab");
            std::env::remove_var("BW_TEST_CONFIG_INKSCAPE");
        }

        let toml = r#"
[sources]
remote_url = "https://github.com/${BW_TEST_CONFIG_ORG}/examples/blob/master/"

[apidocs]
root = "https://${BW_TEST_CONFIG_ORG}.github.io/javadoc/"

[images]
converter = "${BW_TEST_CONFIG_INKSCAPE:-inkscape}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.sources.remote_url.as_deref(),
            Some("https://github.com/liflab/examples/blob/master/")
        );
        assert_eq!(config.apidocs.root, "https://liflab.github.io/javadoc/");
        assert_eq!(config.images.converter.as_deref(), Some("inkscape"));

        unsafe {
            std::env::remove_var("BW_TEST_CONFIG_ORG");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("BW_TEST_CONFIG_MISSING");
        }

        let toml = r#"
[apidocs]
root = "${BW_TEST_CONFIG_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("BW_TEST_CONFIG_MISSING"));
        assert!(err.to_string().contains("apidocs.root"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_remote_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.sources_resolved.remote_url = "github.com/org/repo".to_owned();
        assert_validation_error(&config, &["sources.remote_url", "http"]);
    }

    #[test]
    fn test_validate_apidocs_root_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apidocs.root = "ftp://docs".to_owned();
        assert_validation_error(&config, &["apidocs.root"]);
    }

    #[test]
    fn test_validate_dpi_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.images_resolved.screen_dpi = 0;
        assert_validation_error(&config, &["images.screen_dpi", "greater than 0"]);
    }

    #[test]
    fn test_validate_dpi_too_high() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.images_resolved.screen_dpi = 1200;
        assert_validation_error(&config, &["images.screen_dpi", "1000"]);
    }

    #[test]
    fn test_validate_empty_converter() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.images_resolved.converter = String::new();
        assert_validation_error(&config, &["images.converter"]);
    }

    #[test]
    fn test_validate_dotted_extension() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.book_resolved.document_extension = ".md".to_owned();
        assert_validation_error(&config, &["document_extension"]);
    }

    #[test]
    fn test_validate_input_equals_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.book_resolved.markdown_dir = PathBuf::from("/test/pre-markdown");
        assert_validation_error(&config, &["must differ"]);
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bw.toml");
        std::fs::write(&path, "[book]\ninput_dir = \"chapters\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.book_resolved.input_dir, dir.path().join("chapters"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/definitely/not/bw.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_applies_cli_settings_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bw.toml");
        std::fs::write(&path, "[sources]\nroot = \"code\"\n").unwrap();

        let settings = CliSettings {
            source_root: Some(PathBuf::from("/override")),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.sources_resolved.root, PathBuf::from("/override"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("bw.toml"), "").unwrap();

        assert_eq!(
            Config::discover_config_from(&nested),
            Some(dir.path().join("bw.toml"))
        );
    }
}
