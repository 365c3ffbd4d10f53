use atlasgen::imaging::WebpBackend;
use atlasgen::reader::{DocumentReader, PsdReader};
use atlasgen::{batch, config, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "atlasgen")]
#[command(about = "Extract quiz map assets from layered PSD documents")]
#[command(long_about = "\
Extract quiz map assets from layered PSD documents

Each PSD becomes one asset folder: a base map, an optional contour overlay,
one WebP per country/region layer, and a config.json placement manifest.

Layer naming conventions (case-insensitive):

  'Overlay'             -> extracted as overlay.webp (contour lines)
  'bg' / 'Background'   -> skipped (solid background fill)
  'Karta' or 'map'      -> extracted as map.webp (base map)
  everything else       -> extracted as a country/region image

When no layer is named as the map, the largest region layer is promoted to
base map if it covers more than 40% of the canvas.

The layer name becomes the display name in the game, so name your layers
the way they should appear (e.g. 'Argentina', 'Brasilien', 'Skåne').

Input files smaller than 1 KB are treated as unfetched Git LFS pointers and
skipped. Documents larger than 4000px on their longest side are scaled down
uniformly, images and manifest coordinates alike.

Run 'atlasgen gen-config' to generate a documented atlasgen.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing source PSD documents
    #[arg(long, default_value = "psd", global = true)]
    source: PathBuf,

    /// Additional directory scanned for PSD documents
    #[arg(long, global = true)]
    extra_source: Option<PathBuf>,

    /// Root directory for extracted assets
    #[arg(long, default_value = "assets", global = true)]
    output: PathBuf,

    /// Configuration file (compiled-in defaults when absent)
    #[arg(long, default_value = "atlasgen.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract every discovered document into the asset directory
    Run,
    /// Show layer classification per document without rendering anything
    Inspect,
    /// Print a stock atlasgen.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    let mut source_dirs = vec![cli.source.clone()];
    if let Some(extra) = &cli.extra_source {
        source_dirs.push(extra.clone());
    }

    match cli.command {
        Command::Run => {
            let inputs = batch::discover_inputs(&source_dirs, config.placeholder_threshold)?;
            output::print_placeholder_warnings(&inputs.placeholders);
            if inputs.real.is_empty() {
                return Err(batch::no_real_inputs_error(&source_dirs).into());
            }
            println!("Found {} document(s) to process", inputs.real.len());

            let reader = PsdReader::new();
            let backend = WebpBackend::new();
            let summary = batch::run_batch(
                &reader,
                &backend,
                &inputs.real,
                &cli.output,
                &config,
                output::print_document_run,
            );
            output::print_summary(&summary);
        }
        Command::Inspect => {
            let inputs = batch::discover_inputs(&source_dirs, config.placeholder_threshold)?;
            output::print_placeholder_warnings(&inputs.placeholders);
            if inputs.real.is_empty() {
                return Err(batch::no_real_inputs_error(&source_dirs).into());
            }

            let reader = PsdReader::new();
            for path in &inputs.real {
                let document = reader.open(path)?;
                output::print_inspect_document(&document, &config);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
