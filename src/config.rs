//! `isomesh.toml` loading. Every section and key is optional.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use isomesh_field::FieldSpec;
use isomesh_geom::Vec3;
use isomesh_mesh_cpu::{ContourMode, ExtractOptions};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    #[default]
    Surface,
    Lines,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ExtractSection {
    #[serde(default)]
    pub threshold: f32,
    #[serde(default)]
    pub invert: bool,
    #[serde(default)]
    pub mode: ModeName,
}

impl ExtractSection {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            threshold: self.threshold,
            invert: self.invert,
            mode: match self.mode {
                ModeName::Surface => ContourMode::Surface,
                ModeName::Lines => ContourMode::Lines,
            },
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OutputSection {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// World position of sample `(0, 0, 0)`.
    #[serde(default)]
    pub origin: [f64; 3],
    /// World distance between neighbouring samples along each axis.
    #[serde(default = "default_spacing")]
    pub spacing: [f64; 3],
}

fn default_output_path() -> PathBuf {
    PathBuf::from("isomesh.obj")
}

fn default_spacing() -> [f64; 3] {
    [1.0; 3]
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            origin: [0.0; 3],
            spacing: default_spacing(),
        }
    }
}

impl OutputSection {
    pub fn origin(&self) -> Vec3 {
        Vec3::new(self.origin[0], self.origin[1], self.origin[2])
    }

    pub fn spacing(&self) -> Vec3 {
        Vec3::new(self.spacing[0], self.spacing[1], self.spacing[2])
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct IsomeshConfig {
    #[serde(default)]
    pub field: FieldSpec,
    #[serde(default)]
    pub extract: ExtractSection,
    #[serde(default)]
    pub output: OutputSection,
}

impl IsomeshConfig {
    /// Command-line values win over the file. Flags only ever switch a setting on.
    pub fn apply_overrides(
        &mut self,
        threshold: Option<f32>,
        invert: bool,
        lines: bool,
        output: Option<PathBuf>,
    ) {
        if let Some(t) = threshold {
            self.extract.threshold = t;
        }
        self.extract.invert |= invert;
        if lines {
            self.extract.mode = ModeName::Lines;
        }
        if let Some(p) = output {
            self.output.path = p;
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<IsomeshConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: IsomeshConfig = toml::from_str(&s)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isomesh_field::FieldSource;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: IsomeshConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, IsomeshConfig::default());
        assert_eq!(cfg.field.nx, 24);
        assert_eq!(cfg.extract.options(), ExtractOptions::default());
        assert_eq!(cfg.output.spacing(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn parses_every_section() {
        let cfg: IsomeshConfig = toml::from_str(
            r#"
            [field]
            nx = 32
            ny = 16
            nz = 8
            source = { kind = "gyroid", period = 12.0 }

            [extract]
            threshold = 0.25
            invert = true
            mode = "lines"

            [output]
            path = "out/gyroid.obj"
            origin = [-1.0, 0.0, 2.0]
            spacing = [0.5, 0.5, 2.0]
            "#,
        )
        .unwrap();
        assert_eq!((cfg.field.nx, cfg.field.ny, cfg.field.nz), (32, 16, 8));
        assert_eq!(cfg.field.source, FieldSource::Gyroid { period: 12.0 });
        let opts = cfg.extract.options();
        assert_eq!(opts.threshold, 0.25);
        assert!(opts.invert);
        assert_eq!(opts.mode, ContourMode::Lines);
        assert_eq!(cfg.output.path, PathBuf::from("out/gyroid.obj"));
        assert_eq!(cfg.output.origin(), Vec3::new(-1.0, 0.0, 2.0));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut cfg = IsomeshConfig::default();
        cfg.extract.threshold = 3.0;
        cfg.apply_overrides(Some(-0.5), true, true, Some(PathBuf::from("x.obj")));
        assert_eq!(cfg.extract.threshold, -0.5);
        assert!(cfg.extract.invert);
        assert_eq!(cfg.extract.mode, ModeName::Lines);
        assert_eq!(cfg.output.path, PathBuf::from("x.obj"));

        // absent flags leave the file's choices alone
        let mut cfg = IsomeshConfig::default();
        cfg.extract.invert = true;
        cfg.apply_overrides(None, false, false, None);
        assert!(cfg.extract.invert);
        assert_eq!(cfg.extract.mode, ModeName::Surface);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = toml::from_str::<IsomeshConfig>("[extract]\nmode = \"voxels\"\n");
        assert!(err.is_err());
    }
}
