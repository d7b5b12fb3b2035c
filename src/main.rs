//! Tactical Signs CLI
//!
//! Usage:
//!   tactical-signs [OPTIONS] <SIGN>
//!
//! Options:
//!   -m, --mission <NAME>   Mission overlay drawn inside the sign
//!   -c, --color <NAME>     Palette name [default: rot]
//!   -w, --width <PX>       Output width in pixels [default: 200]
//!   -f, --format <FMT>     svg, png, jpg, jpeg or gif [default: svg]
//!   -o, --output <FILE>    Write to FILE instead of stdout
//!   --catalog <FILE>       Symbol catalog (TOML format)
//!   --list                 List catalog names
//!   -h, --help             Print help

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use tactical_signs::{
    render_sign_with_config, RenderConfig, SignError, SignRequest, SvgConfig, SymbolCatalog,
};

#[derive(Parser)]
#[command(name = "tactical-signs")]
#[command(about = "Render tactical map symbols for emergency services")]
struct Cli {
    /// Base sign name, e.g. "Taktische Einheit"
    #[arg(required_unless_present = "list")]
    sign: Option<String>,

    /// Mission overlay drawn inside the base sign
    #[arg(short, long)]
    mission: Option<String>,

    /// Palette name
    #[arg(short, long, default_value = "rot")]
    color: String,

    /// Output width in pixels; the height follows the sign's aspect ratio
    #[arg(short, long, default_value_t = 200.0)]
    width: f64,

    /// Output format: svg, png, jpg, jpeg or gif
    #[arg(short, long, default_value = "svg")]
    format: String,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Symbol catalog file (TOML format); the built-in catalog is used otherwise
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// List base signs, missions and palettes of the catalog
    #[arg(long)]
    list: bool,

    /// Write SVG without indentation
    #[arg(long)]
    compact: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Load catalog
    let catalog = match &cli.catalog {
        Some(path) => match SymbolCatalog::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading catalog '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SymbolCatalog::default(),
    };

    if cli.list {
        print_listing(&catalog);
        return;
    }

    let Some(sign) = cli.sign else {
        eprintln!("Error: no sign name given");
        std::process::exit(1);
    };

    let mut request = SignRequest::new(sign, cli.color, cli.width);
    if let Some(mission) = cli.mission {
        request = request.with_mission(mission);
    }

    let config =
        RenderConfig::new().with_svg(SvgConfig::new().with_pretty_print(!cli.compact));
    let bytes = match render_sign_with_config(&catalog, &request, &cli.format, &config) {
        Ok(bytes) => bytes,
        Err(SignError::MalformedFragment(e)) => {
            let filename = cli
                .catalog
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in catalog".to_string());
            eprintln!("{}", e.format(&filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let written = match &cli.output {
        Some(path) => fs::write(path, &bytes),
        None => io::stdout().lock().write_all(&bytes),
    };
    if let Err(e) = written {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    }
}

fn print_listing(catalog: &SymbolCatalog) {
    println!("BASE SIGNS");
    for name in catalog.base_sign_names() {
        println!("    {}", name);
    }
    println!("\nMISSIONS");
    for name in catalog.mission_names() {
        println!("    {}", name);
    }
    println!("\nPALETTES");
    for name in catalog.palette_names() {
        if let Ok(colors) = catalog.colors(name) {
            println!(
                "    {:<10} {} (fill {}, border {})",
                name, colors.organisation, colors.fill, colors.border
            );
        }
    }
}
