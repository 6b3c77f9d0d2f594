//! gcdisc-meta
//!
//! Prints the metadata and banner text of GameCube disc images and optionally
//! saves their banners as PNG files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gcdisc_meta::config::get_config;
use gcdisc_meta::disc::{open_volume, Volume};
use gcdisc_meta::export::{banner_file_name, export_banner_png, volume_report, VolumeReport};

const USAGE: &str = "Usage: gcdisc-meta [--json] [--export-banners DIR] <image|directory>...";

struct Options {
    json: bool,
    banner_dir: Option<PathBuf>,
    inputs: Vec<PathBuf>,
}

fn parse_args() -> Result<Options, String> {
    let config = get_config();
    let mut options = Options {
        json: config.output.json,
        banner_dir: config
            .output
            .export_banners
            .then(|| PathBuf::from(&config.output.banner_dir)),
        inputs: Vec::new(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => options.json = true,
            "--export-banners" => {
                let dir = args.next().ok_or("--export-banners needs a directory")?;
                options.banner_dir = Some(PathBuf::from(dir));
            }
            "--version" => {
                println!("gcdisc-meta {}", env!("APP_VERSION"));
                std::process::exit(0);
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ if arg.starts_with("--") => return Err(format!("Unknown option: {}", arg)),
            _ => options.inputs.push(PathBuf::from(arg)),
        }
    }

    if options.inputs.is_empty() {
        return Err(USAGE.to_string());
    }
    Ok(options)
}

/// Expand directories into the disc images they contain
fn collect_images(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let scan = &get_config().scan;
    let mut images = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            images.push(input.clone());
            continue;
        }
        match std::fs::read_dir(input) {
            Ok(entries) => {
                let mut found: Vec<PathBuf> = entries
                    .filter_map(|e| e.ok().map(|e| e.path()))
                    .filter(|p| p.is_file() && scan.matches(p))
                    .collect();
                found.sort();
                images.extend(found);
            }
            Err(e) => log::warn!("Cannot read directory {}: {}", input.display(), e),
        }
    }

    images
}

fn print_text(path: &Path, report: &VolumeReport) {
    println!("{}", path.display());
    println!("  Game ID:        {}", report.game_id);
    println!("  Internal name:  {}", report.internal_name);
    println!("  Maker:          {}", report.maker_id);
    println!("  Region:         {:?}", report.region);
    println!("  Country:        {:?}", report.country);
    if let Some(revision) = report.revision {
        println!("  Revision:       {}", revision);
    }
    if let Some(disc) = report.disc_number {
        println!("  Disc number:    {}", disc);
    }
    println!("  Apploader date: {}", report.apploader_date);
    println!("  Format:         {}", report.blob_type.display_name());
    println!("  Size:           {} bytes ({} raw)", report.size, report.raw_size);

    for (language, name) in &report.long_names {
        println!("  Title [{}]: {}", language.display_name(), name);
    }
    for (language, maker) in &report.long_makers {
        println!("  Publisher [{}]: {}", language.display_name(), maker);
    }
    for (language, description) in &report.descriptions {
        println!("  Description [{}]: {}", language.display_name(), description);
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = &options.banner_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Cannot create {}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let mut failures = 0;
    for path in collect_images(&options.inputs) {
        let volume = match open_volume(&path) {
            Ok(volume) => volume,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failures += 1;
                continue;
            }
        };

        let report = volume_report(&volume);
        if options.json {
            match serde_json::to_string(&report) {
                Ok(line) => println!("{}", line),
                Err(e) => log::error!("Failed to serialize report: {}", e),
            }
        } else {
            print_text(&path, &report);
        }

        if let Some(dir) = &options.banner_dir {
            let banner = volume.banner();
            if banner.is_empty() {
                log::info!("{} has no banner", path.display());
                continue;
            }
            let output = dir.join(banner_file_name(&report.game_id, &path));
            match export_banner_png(&banner, &output) {
                Ok(result) => log::info!("Saved banner to {}", result.output_path),
                Err(e) => eprintln!("{}: {}", path.display(), e),
            }
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
