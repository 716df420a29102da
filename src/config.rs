use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "thermoplot.json";

// ---------------------------------------------------------------------------
// Render target
// ---------------------------------------------------------------------------

/// Where finished figures go.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum OutputTarget {
    /// One native window per figure, blocking until closed.
    #[default]
    Window,
    /// One PNG per figure written into `dir`.
    Png {
        #[serde(default = "default_png_dir")]
        dir: PathBuf,
    },
}

fn default_png_dir() -> PathBuf {
    PathBuf::from("figures")
}

// ---------------------------------------------------------------------------
// PlotConfig
// ---------------------------------------------------------------------------

/// Settings shared by both binaries. Every field has a default, so an
/// absent file, or `{}`, is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Directory holding the input tables.
    pub data_dir: PathBuf,
    /// Field separator of the input tables.
    pub delimiter: char,
    /// Figure size in pixels, `[width, height]`.
    pub figure_size: (u32, u32),
    pub output: OutputTarget,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            delimiter: ';',
            figure_size: (1200, 800),
            output: OutputTarget::default(),
        }
    }
}

impl PlotConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: PlotConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter '{}' must be a single ASCII character", self.delimiter);
        }
        let (w, h) = self.figure_size;
        if w == 0 || h == 0 {
            bail!("figure_size {w}x{h} must be non-zero");
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII for loaded configs.
        u8::try_from(self.delimiter).unwrap_or(b';')
    }

    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}
