//! polymap - layered polygon map generator
//!
//! Usage:
//!   polymap generate [options]   Generate a map
//!   polymap defaults [--json]    Print the default map config

use std::env;

mod cli;

use cli::{cmd_defaults, cmd_generate, CliError};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("polymap");

    let result: Result<(), CliError> = match args.get(1).map(String::as_str) {
        Some("generate") => cmd_generate(&args[2..]),
        Some("defaults") => cmd_defaults(&args[2..]),
        Some("help" | "--help" | "-h") => {
            print_usage(prog);
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_usage(prog);
            std::process::exit(1);
        }
        None => {
            print_usage(prog);
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("polymap - layered polygon map generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} generate [options]", prog);
    eprintln!("  {} defaults [--json]", prog);
    eprintln!("  {} help", prog);
    eprintln!();
    eprintln!("Generate options:");
    eprintln!("  -c, --config <file>      Map config, YAML or JSON (default: built-in defaults)");
    eprintln!("  -n, --sides <n>          Polygon side count (min 3)");
    eprintln!("  -g, --generations <n>    Inside generation count (min 1)");
    eprintln!("                           Inward steps grow each generation; with the default");
    eprintln!("                           sizes a triangle fits 3, a hexagon 6. Past that the");
    eprintln!("                           map collapses: raise lines.outside.length or lower");
    eprintln!("                           lines.inside.distance in a config file.");
    eprintln!("  -r, --rings <n>          Rings around the origin");
    eprintln!("  -s, --sectors <n>        Sector spokes per side inside each ring");
    eprintln!("  -o, --output <file>      Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>       Output format: svg, json (default: svg)");
    eprintln!("  --json                   Same as --format json");
    eprintln!();
    eprintln!("Image options:");
    eprintln!("  --png <file>             Also rasterize to PNG");
    eprintln!("  --ppu <n>                Pixels per map unit (default: 10)");
    eprintln!("  --size <WxH>             Image size in pixels (default: 2048x2048)");
    eprintln!("  --blur <sigma>           Gaussian blur, PNG only");
    eprintln!("  --mask                   Clip the PNG to the map boundary");
    eprintln!();
    eprintln!("Logging:");
    eprintln!("  RUST_LOG=debug {} generate ...   Show per-generation details", prog);
}
