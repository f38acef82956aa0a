use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level dwtviz configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DwtvizConfig {
    /// Heatmap settings.
    #[serde(default)]
    pub render: RenderToml,

    /// Gaussian-process smoothing settings.
    #[serde(default)]
    pub smooth: SmoothToml,
}

impl DwtvizConfig {
    /// Reads the TOML file at `path`, or returns the defaults without one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderToml {
    #[serde(default = "default_wavelet")]
    pub wavelet: String,
    #[serde(default)]
    pub level: Option<usize>,
    #[serde(default)]
    pub approx: Option<bool>,
    #[serde(default = "default_cmap")]
    pub cmap: String,
    #[serde(default = "default_decomposition")]
    pub decomposition: String,
    #[serde(default)]
    pub cbar_limit: Option<f64>,
    #[serde(default)]
    pub xyplot: bool,
    #[serde(default = "default_true")]
    pub xticks: bool,
    #[serde(default = "default_true")]
    pub yticks: bool,
    #[serde(default = "default_true")]
    pub index: bool,
}

impl Default for RenderToml {
    fn default() -> Self {
        Self {
            wavelet: default_wavelet(),
            level: None,
            approx: None,
            cmap: default_cmap(),
            decomposition: default_decomposition(),
            cbar_limit: None,
            xyplot: false,
            xticks: true,
            yticks: true,
            index: true,
        }
    }
}

fn default_wavelet() -> String {
    "db1".to_string()
}
fn default_cmap() -> String {
    "seismic".to_string()
}
fn default_decomposition() -> String {
    "dwt".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmoothToml {
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default = "default_samples")]
    pub samples: u32,
    #[serde(default)]
    pub truncate: bool,
    #[serde(default)]
    pub xseconds: bool,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_n_restarts")]
    pub n_restarts: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub threads: Option<usize>,
    /// Kernel components; the multiscale default when absent.
    #[serde(default)]
    pub kernel: Option<Vec<RbfToml>>,
}

impl Default for SmoothToml {
    fn default() -> Self {
        Self {
            length: None,
            samples: default_samples(),
            truncate: false,
            xseconds: false,
            alpha: default_alpha(),
            n_restarts: default_n_restarts(),
            seed: 0,
            threads: None,
            kernel: None,
        }
    }
}

fn default_samples() -> u32 {
    dwtviz_gp::DEFAULT_SAMPLES
}
fn default_alpha() -> f64 {
    dwtviz_gp::DEFAULT_ALPHA
}
fn default_n_restarts() -> usize {
    dwtviz_gp::DEFAULT_RESTARTS
}

/// One `C(constant) * RBF(length_scale, length_bounds)` kernel term.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RbfToml {
    pub constant: f64,
    pub length_scale: f64,
    pub length_bounds: [f64; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: DwtvizConfig = toml::from_str("").unwrap();
        assert_eq!(config.render.wavelet, "db1");
        assert_eq!(config.render.cmap, "seismic");
        assert_eq!(config.render.decomposition, "dwt");
        assert!(config.render.xticks && config.render.index);
        assert_eq!(config.smooth.samples, 8);
        assert_eq!(config.smooth.n_restarts, 12);
        assert!(config.smooth.kernel.is_none());
    }

    #[test]
    fn sections_parse() {
        let config: DwtvizConfig = toml::from_str(
            r#"
            [render]
            wavelet = "db2"
            level = 3
            cbar_limit = 4.5
            xyplot = true

            [smooth]
            samples = 6
            truncate = true

            [[smooth.kernel]]
            constant = 1.0
            length_scale = 10.0
            length_bounds = [1.0, 100.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.render.level, Some(3));
        assert_eq!(config.render.cbar_limit, Some(4.5));
        assert!(config.render.xyplot);
        assert_eq!(config.smooth.samples, 6);
        assert_eq!(config.smooth.kernel.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn load_without_a_path_gives_defaults() {
        let config = DwtvizConfig::load(None).unwrap();
        assert_eq!(config.render.wavelet, "db1");
    }

    #[test]
    fn load_reads_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dwtviz.toml");
        std::fs::write(&path, "[render]\ncmap = \"bwr\"\n").unwrap();
        let config = DwtvizConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.render.cmap, "bwr");

        std::fs::write(&path, "[render]\nlevel = \"deep\"\n").unwrap();
        let err = DwtvizConfig::load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("failed to parse TOML config"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<DwtvizConfig, _> = toml::from_str("[render]\ncolour = \"red\"\n");
        assert!(result.is_err());
    }
}
