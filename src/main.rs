use clap::{Parser, Subcommand};
use std::path::PathBuf;
use unpillar::imaging::RustBackend;
use unpillar::library::{DirectoryLibrary, PhotoLibrary};
use unpillar::{batch, config, fix, output, scan};

#[derive(Parser)]
#[command(name = "unpillar")]
#[command(version)]
#[command(about = "Detects and crops near-black borders from photos")]
#[command(long_about = "\
Detects and crops near-black borders from photos

Screenshots and re-exported frames often carry solid dark pillarbox bars on
their left and right edges. unpillar scans each image's midline for those
bars and, when a real border is found, writes a corrected copy next to the
source:

  IMG_0042.jpg  ->  IMG_0042_corrected.jpg

Inputs can be image files or directories (searched recursively for
supported types: jpg, jpeg, png, tif, tiff, webp). Images are processed one
at a time; a file that cannot be decoded or cropped is reported and left
untouched without stopping the rest of the batch.

With [library] configured, every corrected copy is also published into the
library directory (optionally under an album subdirectory).

Run 'unpillar gen-config' to generate a documented config.toml.")]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report detected borders without writing any files
    Detect {
        /// Image files or directories to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Crop detected borders into corrected copies
    Fix {
        /// Image files or directories to correct
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Skip the photo-library copy even when one is configured
        #[arg(long)]
        no_library: bool,
        /// Write a JSON report of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Detect { paths } => {
            let config = config::load_config(&cli.config_dir)?;
            let images = scan::collect_images(&paths)?;
            let backend = RustBackend::new();

            for image in &images {
                let result = fix::inspect(&backend, image, &config);
                output::print_detect_report(image, &result, config.crop.edge_slack);
            }
        }
        Command::Fix {
            paths,
            no_library,
            report,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let images = scan::collect_images(&paths)?;
            let backend = RustBackend::new();

            let library = match (&config.library.dir, no_library) {
                (Some(dir), false) => Some(DirectoryLibrary::new(dir)),
                _ => None,
            };

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_batch_event(&event) {
                        println!("{}", line);
                    }
                }
            });

            let reports = batch::process_all(
                &backend,
                library.as_ref().map(|l| l as &dyn PhotoLibrary),
                &images,
                &config,
                Some(tx),
            );
            printer.join().unwrap();

            output::print_batch_summary(&reports);

            if let Some(report_path) = report {
                let summary = batch::BatchReport::from_reports(&reports);
                std::fs::write(&report_path, serde_json::to_string_pretty(&summary)?)?;
                println!("Report: {}", report_path.display());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
