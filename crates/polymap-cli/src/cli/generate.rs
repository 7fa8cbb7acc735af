//! Generate command implementation.

use log::info;
use serde::Serialize;

use polymap::{Generator, MapInfo};

use super::common::{flag_value, parse_size, parse_value, write_output, CliError, OutputFormat};
use super::config::MapConfig;
use super::render::{map_to_svg, save_png, RenderOptions};

/// A line in JSON output format.
#[derive(Serialize)]
struct JsonLine {
    role: &'static str,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    thickness: f64,
}

/// A circle in JSON output format.
#[derive(Serialize)]
struct JsonCircle {
    role: &'static str,
    x: f64,
    y: f64,
    radius: f64,
    thickness: f64,
}

/// A point in JSON output format.
#[derive(Serialize)]
struct JsonPoint {
    x: f64,
    y: f64,
}

/// JSON output: the whole map in map units.
#[derive(Serialize)]
struct JsonMap {
    lines: Vec<JsonLine>,
    circles: Vec<JsonCircle>,
    boundary: Vec<JsonPoint>,
}

impl JsonMap {
    fn from_map(map: &MapInfo) -> Self {
        JsonMap {
            lines: map
                .lines()
                .map(|l| {
                    let (a, b) = l.boundaries();
                    JsonLine {
                        role: l.role().name(),
                        x1: a.x,
                        y1: a.y,
                        x2: b.x,
                        y2: b.y,
                        thickness: l.thickness(),
                    }
                })
                .collect(),
            circles: map
                .circles()
                .map(|c| JsonCircle {
                    role: c.role().name(),
                    x: c.center().x,
                    y: c.center().y,
                    radius: c.radius(),
                    thickness: c.thickness(),
                })
                .collect(),
            boundary: map.boundary().into_iter().map(|p| JsonPoint { x: p.x, y: p.y }).collect(),
        }
    }
}

/// Parsed `generate` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    pub config_path: Option<String>,
    pub sides: Option<i64>,
    pub generations: Option<i64>,
    pub rings: Option<i64>,
    pub sectors: Option<i64>,
    pub output_path: Option<String>,
    pub format: OutputFormat,
    pub png_path: Option<String>,
    pub render: RenderOptions,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            config_path: None,
            sides: None,
            generations: None,
            rings: None,
            sectors: None,
            output_path: None,
            format: OutputFormat::Svg,
            png_path: None,
            render: RenderOptions::default(),
        }
    }
}

impl GenerateArgs {
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut parsed = GenerateArgs::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "-c" | "--config" => {
                    parsed.config_path = Some(flag_value(args, &mut i)?.to_string());
                }
                "-n" | "--sides" => {
                    parsed.sides = Some(parse_value(flag, flag_value(args, &mut i)?)?);
                }
                "-g" | "--generations" => {
                    parsed.generations = Some(parse_value(flag, flag_value(args, &mut i)?)?);
                }
                "-r" | "--rings" => {
                    parsed.rings = Some(parse_value(flag, flag_value(args, &mut i)?)?);
                }
                "-s" | "--sectors" => {
                    parsed.sectors = Some(parse_value(flag, flag_value(args, &mut i)?)?);
                }
                "-o" | "--output" => {
                    parsed.output_path = Some(flag_value(args, &mut i)?.to_string());
                }
                "-f" | "--format" => {
                    let value = flag_value(args, &mut i)?;
                    parsed.format = OutputFormat::from_name(value).ok_or_else(|| {
                        CliError::Config(format!("unknown format: {}. Use 'svg' or 'json'.", value))
                    })?;
                }
                "--json" => {
                    parsed.format = OutputFormat::Json;
                }
                "--png" => {
                    parsed.png_path = Some(flag_value(args, &mut i)?.to_string());
                }
                "--ppu" => {
                    let ppu: f64 = parse_value(flag, flag_value(args, &mut i)?)?;
                    if ppu <= 0.0 || !ppu.is_finite() {
                        return Err(CliError::Config(format!("--ppu must be positive, got {}", ppu)));
                    }
                    parsed.render.pixels_per_unit = ppu;
                }
                "--size" => {
                    let (width, height) = parse_size(flag_value(args, &mut i)?)?;
                    parsed.render.width = width;
                    parsed.render.height = height;
                }
                "--blur" => {
                    parsed.render.blur = Some(parse_value(flag, flag_value(args, &mut i)?)?);
                }
                "--mask" => {
                    parsed.render.mask = true;
                }
                other => {
                    return Err(CliError::Config(format!("unknown option: {}", other)));
                }
            }
            i += 1;
        }

        Ok(parsed)
    }

    /// Config file (or defaults) with command-line counts applied on top.
    pub fn map_config(&self) -> Result<MapConfig, CliError> {
        let mut config = match &self.config_path {
            Some(path) => {
                eprintln!("Loading config: {}", path);
                MapConfig::load(path)?
            }
            None => MapConfig::default(),
        };

        if let Some(sides) = self.sides {
            config.sides = sides;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(rings) = self.rings {
            config.rings = rings;
        }
        if let Some(sectors) = self.sectors {
            config.sectors = sectors;
        }
        Ok(config)
    }
}

/// Execute the generate command.
pub fn cmd_generate(args: &[String]) -> Result<(), CliError> {
    let args = GenerateArgs::parse(args)?;
    let config = args.map_config()?;

    let generator = Generator::new(config.to_generator_config())?;
    let map = generator.generate();

    let stats = map.stats();
    info!(
        "{} sides, {} generations: {} lines, {} circles",
        generator.config().side_count,
        generator.config().generation_count,
        stats.total_lines(),
        stats.total_circles()
    );

    let text = match args.format {
        OutputFormat::Svg => map_to_svg(&map, &args.render),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&JsonMap::from_map(&map))?;
            json.push('\n');
            json
        }
    };

    // A PNG alone doesn't also dump the map on stdout
    if args.png_path.is_none() || args.output_path.is_some() {
        write_output(args.output_path.as_deref(), &text)?;
    }

    if let Some(png_path) = &args.png_path {
        save_png(&map, png_path, &args.render)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polymap::GeneratorConfig;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_counts_and_output() {
        let parsed = GenerateArgs::parse(&args(&["-n", "6", "--generations", "3", "-r", "2", "-o", "map.svg"])).unwrap();
        assert_eq!(parsed.sides, Some(6));
        assert_eq!(parsed.generations, Some(3));
        assert_eq!(parsed.rings, Some(2));
        assert_eq!(parsed.sectors, None);
        assert_eq!(parsed.output_path.as_deref(), Some("map.svg"));
        assert_eq!(parsed.format, OutputFormat::Svg);
    }

    #[test]
    fn parses_render_options() {
        let parsed = GenerateArgs::parse(&args(&["--png", "m.png", "--ppu", "4", "--size", "300x200", "--blur", "1.5", "--mask"])).unwrap();
        assert_eq!(parsed.png_path.as_deref(), Some("m.png"));
        assert_eq!(parsed.render.pixels_per_unit, 4.0);
        assert_eq!((parsed.render.width, parsed.render.height), (300, 200));
        assert_eq!(parsed.render.blur, Some(1.5));
        assert!(parsed.render.mask);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(GenerateArgs::parse(&args(&["--bogus"])).is_err());
        assert!(GenerateArgs::parse(&args(&["-n"])).is_err());
        assert!(GenerateArgs::parse(&args(&["-n", "six"])).is_err());
        assert!(GenerateArgs::parse(&args(&["-f", "png"])).is_err());
        assert!(GenerateArgs::parse(&args(&["--ppu", "0"])).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = GenerateArgs::parse(&args(&["-n", "8", "-s", "2", "--json"])).unwrap();
        let config = parsed.map_config().unwrap();
        assert_eq!(config.sides, 8);
        assert_eq!(config.sectors, 2);
        assert_eq!(config.generations, MapConfig::default().generations);
        assert_eq!(parsed.format, OutputFormat::Json);
    }

    #[test]
    fn json_lists_roles_in_order() {
        let map = Generator::new(GeneratorConfig::default().with_sides(3)).unwrap().generate();
        let value = serde_json::to_value(JsonMap::from_map(&map)).unwrap();

        let lines = value["lines"].as_array().unwrap();
        assert_eq!(lines.len(), map.stats().total_lines());
        assert_eq!(lines[0]["role"], "outside");
        assert!(lines[0].get("thickness").is_some());

        assert_eq!(value["circles"][0]["role"], "outside");
        assert_eq!(value["boundary"].as_array().unwrap().len(), 3);
    }
}
