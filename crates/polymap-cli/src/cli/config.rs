//! Map configuration files.
//!
//! A map config is a YAML (or JSON) document describing one map. Every
//! field is optional; anything left out takes the library default.
//!
//! ```yaml
//! sides: 6
//! generations: 3
//! lines:
//!   inside: { length: 8 }
//! noise:
//!   scale: { kind: linear, slope: 0.5, offset: 1 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use polymap::{
    CircleParameterSet, CircleParameters, GeneratorConfig, LineParameterSet, LineParameters, Noise,
};

use super::common::CliError;

/// A complete map description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Polygon side count (raised to 3)
    pub sides: i64,

    /// Inside generation count (raised to 1)
    pub generations: i64,

    /// Rings around the origin
    pub rings: i64,

    /// Sector spokes per side inside each ring
    pub sectors: i64,

    pub lines: LineStyles,
    pub circles: CircleStyles,
    pub noise: NoiseSettings,
}

impl Default for MapConfig {
    fn default() -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            sides: defaults.side_count as i64,
            generations: defaults.generation_count as i64,
            rings: defaults.rings_count as i64,
            sectors: defaults.sector_subdivisions as i64,
            lines: LineStyles::from_parameters(&defaults.lines),
            circles: CircleStyles::from_parameters(&defaults.circles),
            noise: NoiseSettings::default(),
        }
    }
}

/// Style overrides for one line role. Unset fields keep the role default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl LineStyle {
    fn from_parameters(params: &LineParameters) -> Self {
        Self {
            thickness: Some(params.thickness),
            length: Some(params.length),
            distance: Some(params.distance),
        }
    }

    /// Fill unset fields from `fallback`.
    pub fn resolve(&self, fallback: &LineParameters) -> LineParameters {
        LineParameters::new(
            self.thickness.unwrap_or(fallback.thickness),
            self.length.unwrap_or(fallback.length),
            self.distance.unwrap_or(fallback.distance),
        )
    }
}

/// Style overrides for one circle role.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CircleStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl CircleStyle {
    fn from_parameters(params: &CircleParameters) -> Self {
        Self {
            radius: Some(params.radius),
            thickness: Some(params.thickness),
        }
    }

    pub fn resolve(&self, fallback: &CircleParameters) -> CircleParameters {
        CircleParameters::new(
            self.radius.unwrap_or(fallback.radius),
            self.thickness.unwrap_or(fallback.thickness),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyles {
    pub outside: LineStyle,
    pub inside: LineStyle,
    pub central: LineStyle,
    pub connecting: LineStyle,
}

impl LineStyles {
    fn from_parameters(params: &LineParameterSet) -> Self {
        Self {
            outside: LineStyle::from_parameters(&params.outside),
            inside: LineStyle::from_parameters(&params.inside),
            central: LineStyle::from_parameters(&params.central),
            connecting: LineStyle::from_parameters(&params.connecting),
        }
    }

    pub fn to_parameters(&self) -> LineParameterSet {
        let defaults = LineParameterSet::DEFAULT;
        LineParameterSet {
            outside: self.outside.resolve(&defaults.outside),
            inside: self.inside.resolve(&defaults.inside),
            central: self.central.resolve(&defaults.central),
            connecting: self.connecting.resolve(&defaults.connecting),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleStyles {
    pub outside: CircleStyle,
    pub inside: CircleStyle,
    pub rings: CircleStyle,
    pub connecting: CircleStyle,
}

impl CircleStyles {
    fn from_parameters(params: &CircleParameterSet) -> Self {
        Self {
            outside: CircleStyle::from_parameters(&params.outside),
            inside: CircleStyle::from_parameters(&params.inside),
            rings: CircleStyle::from_parameters(&params.rings),
            connecting: CircleStyle::from_parameters(&params.connecting),
        }
    }

    pub fn to_parameters(&self) -> CircleParameterSet {
        let defaults = CircleParameterSet::DEFAULT;
        CircleParameterSet {
            outside: self.outside.resolve(&defaults.outside),
            inside: self.inside.resolve(&defaults.inside),
            rings: self.rings.resolve(&defaults.rings),
            connecting: self.connecting.resolve(&defaults.connecting),
        }
    }
}

/// A noise function, tagged by `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NoiseSpec {
    #[default]
    Identity,
    Constant {
        value: f64,
    },
    Linear {
        slope: f64,
        #[serde(default)]
        offset: f64,
    },
    Power {
        exponent: f64,
    },
    Jitter {
        #[serde(default)]
        seed: u64,
        amplitude: f64,
    },
}

impl NoiseSpec {
    pub fn to_noise(&self) -> Noise {
        match *self {
            NoiseSpec::Identity => Noise::Identity,
            NoiseSpec::Constant { value } => Noise::Constant(value),
            NoiseSpec::Linear { slope, offset } => Noise::Linear { slope, offset },
            NoiseSpec::Power { exponent } => Noise::Power { exponent },
            NoiseSpec::Jitter { seed, amplitude } => Noise::Jitter { seed, amplitude },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Multiplier on the inward step of each generation
    pub distance: NoiseSpec,

    /// Divisor on inside line length, multiplier on ring radius
    pub scale: NoiseSpec,
}

/// Negative counts clamp to zero; the generator raises them further.
fn count(value: i64) -> usize {
    value.max(0) as usize
}

impl MapConfig {
    /// Load a config from a `.json` file, or YAML for anything else.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read {}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, CliError> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String, CliError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_sides(count(self.sides))
            .with_generations(count(self.generations))
            .with_rings(count(self.rings))
            .with_sector_subdivisions(count(self.sectors))
            .with_lines(self.lines.to_parameters())
            .with_circles(self.circles.to_parameters())
            .with_noise_distance(self.noise.distance.to_noise())
            .with_noise_scale(self.noise.scale.to_noise())
    }
}

/// Execute the defaults command: print the default map config.
pub fn cmd_defaults(args: &[String]) -> Result<(), CliError> {
    let json = args.iter().any(|a| a == "--json");
    let config = MapConfig::default();
    let text = if json { config.to_json()? } else { config.to_yaml()? };
    println!("{}", text.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(MapConfig::from_yaml("").unwrap(), MapConfig::default());
        assert_eq!(MapConfig::from_json("{}").unwrap(), MapConfig::default());
    }

    #[test]
    fn partial_style_keeps_role_defaults() {
        let config = MapConfig::from_yaml("lines:\n  inside:\n    length: 8\n").unwrap();
        let params = config.to_generator_config().lines;
        assert_eq!(params.inside.length, 8.0);
        assert_eq!(params.inside.distance, LineParameterSet::DEFAULT.inside.distance);
        assert_eq!(params.outside, LineParameterSet::DEFAULT.outside);
    }

    #[test]
    fn negative_counts_are_clamped() {
        let config = MapConfig::from_yaml("sides: -4\ngenerations: 0\nrings: -1\nsectors: -2\n").unwrap();
        let generator = config.to_generator_config().coerced();
        assert_eq!(generator.side_count, 3);
        assert_eq!(generator.generation_count, 1);
        assert_eq!(generator.rings_count, 0);
        assert_eq!(generator.sector_subdivisions, 0);
    }

    #[test]
    fn noise_kinds() {
        let yaml = r#"
noise:
  distance: { kind: constant, value: 2 }
  scale: { kind: jitter, seed: 9, amplitude: 0.1 }
"#;
        let config = MapConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.noise.distance, NoiseSpec::Constant { value: 2.0 });

        let generator = config.to_generator_config();
        assert_eq!(generator.noise_distance.eval(5), 2.0);
        assert_eq!(generator.noise_scale.name(), "jitter");
    }

    #[test]
    fn linear_offset_is_optional() {
        let config = MapConfig::from_yaml("noise:\n  scale: { kind: linear, slope: 2 }\n").unwrap();
        assert_eq!(config.noise.scale, NoiseSpec::Linear { slope: 2.0, offset: 0.0 });
    }

    #[test]
    fn unknown_noise_kind_is_an_error() {
        let result = MapConfig::from_yaml("noise:\n  scale: { kind: wobble }\n");
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn defaults_round_trip() {
        let config = MapConfig::default();
        assert_eq!(MapConfig::from_yaml(&config.to_yaml().unwrap()).unwrap(), config);
        assert_eq!(MapConfig::from_json(&config.to_json().unwrap()).unwrap(), config);
    }
}
