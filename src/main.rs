// src/main.rs
//
// imgscale: rescale the images of an HTML field by rewriting their inline style
//
// - Reads one HTML fragment (e.g. a flashcard field saved to a file).
// - For every <img>, in document order, sets `{property}:{size}px;` in its style
//   attribute, keeping all other declarations, attributes and text byte for byte.
// - Where sizes come from:
//     • --size N   : N for every image, no questions asked.
//     • --bulk     : ask once, apply the answer to every image (a declined answer
//                    skips every image).
//     • default    : ask per image on stdin; empty answer = default size, 's' = skip.
// - Settings: --property / --default-size override the TOML file given by --config
//   (keys `size-property`, `default-size`), which overrides the built-in
//   max-height / 150.
// - The input is only overwritten when at least one image changed.

use clap::{ArgAction, Parser};
use imgscale::source::MAX_SIZE;
use imgscale::{
    decode_fragment, logger, scale_images, BulkSize, Config, ImageRef, Prompt, Result,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// CSS property to set on each image [default: max-height]
    #[arg(long)]
    property: Option<String>,

    /// Apply this size (px) to every image without asking
    #[arg(long, conflicts_with = "bulk", value_parser = clap::value_parser!(i64).range(0..=MAX_SIZE))]
    size: Option<i64>,

    /// Ask once for a size that applies to every image
    #[arg(long, action = ArgAction::SetTrue)]
    bulk: bool,

    /// Size offered when asking [default: 150]
    #[arg(long = "default-size", value_parser = clap::value_parser!(i64).range(0..=MAX_SIZE))]
    default_size: Option<i64>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log every image decision
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Input file
    input: PathBuf,

    /// Output file (default: overwrite input)
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let file_config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    // Precedence: explicit flags override the config file.
    let config = Config {
        size_property: cli.property.clone().unwrap_or(file_config.size_property),
        default_size: cli.default_size.unwrap_or(file_config.default_size),
    };
    config.validate()?;
    let property = config.size_property.as_str();

    let src = fs::read(&cli.input)?;
    let html = decode_fragment(&src)?;

    let scaled = if let Some(size) = cli.size {
        scale_images(html, property, &mut |_: &ImageRef| Some(size))?
    } else {
        let mut prompt = Prompt::new(io::stdin().lock(), io::stderr(), property, config.default_size);
        if cli.bulk {
            let mut bulk = BulkSize::new(|| prompt.ask_for_all());
            scale_images(html, property, &mut bulk)?
        } else {
            scale_images(html, property, &mut prompt)?
        }
    };

    let out_path = cli.output.as_ref().unwrap_or(&cli.input);
    if scaled == html && cli.output.is_none() {
        info!("no image changed, leaving {} as is", cli.input.display());
        return Ok(());
    }
    fs::write(out_path, scaled)?;
    info!("wrote {}", out_path.display());
    Ok(())
}
