//! Common utilities shared across CLI commands.

use std::fmt;
use std::fs;
use std::io::{self, Write};

use polymap::GeometryError;

/// Output format for generated maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Svg,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Errors a command can fail with.
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing a file failed
    Io(io::Error),
    /// Bad arguments or an unreadable config file
    Config(String),
    /// The generator rejected the configuration
    Geometry(GeometryError),
    /// Rasterizing or saving an image failed
    Render(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Config(msg) => write!(f, "Config error: {}", msg),
            CliError::Geometry(e) => write!(f, "Geometry error: {}", e),
            CliError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<GeometryError> for CliError {
    fn from(e: GeometryError) -> Self {
        CliError::Geometry(e)
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

/// Fetch the value following flag `args[*i]`, advancing `i` past it.
pub fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, CliError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::Config(format!("{} needs a value", flag)))
}

/// Parse a flag value, naming the flag on failure.
pub fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, CliError> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("invalid value for {}: {}", flag, value)))
}

/// Parse `WIDTHxHEIGHT`, e.g. `2048x1024`.
pub fn parse_size(value: &str) -> Result<(u32, u32), CliError> {
    let invalid = || CliError::Config(format!("invalid size: {} (expected WIDTHxHEIGHT)", value));
    let (w, h) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

/// Write to `path`, or to stdout when the path is missing or `-`.
pub fn write_output(path: Option<&str>, content: &str) -> Result<(), CliError> {
    match path {
        Some(p) if p != "-" => {
            fs::write(p, content)?;
            eprintln!("Wrote: {}", p);
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
