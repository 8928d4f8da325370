use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use portrait_gallery::{
    CaptionFont, GalleryDefinition, GalleryError, GalleryResult, LayoutParams, RunOptions,
    render_gallery,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portrait-gallery", version, about = "Create a portrait gallery.")]
struct Cli {
    /// Portrait location (directory the definition's portrait files are relative to).
    #[arg(long = "portrait-path", value_name = "PATH")]
    portrait_path: PathBuf,

    /// Definition file location (YAML).
    #[arg(long = "data-file", value_name = "FILE")]
    data_file: PathBuf,

    /// Use this image, relative to the portrait path, when a portrait cannot be opened
    /// instead of raising an error.
    #[arg(long = "default-portrait", value_name = "FILE")]
    default_portrait: Option<PathBuf>,

    /// Directory receiving the batch files (defaults to the system temp directory).
    #[arg(long = "out-dir", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// JSON file overriding grid and cell geometry.
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Caption font file (TrueType/OpenType); system fonts are searched otherwise.
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Log debug diagnostics to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(written) => {
            println!("Success: wrote {written} batch file(s)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            eprintln!("Aborting on error");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> GalleryResult<usize> {
    let portrait_dir = expand_home(&cli.portrait_path);
    if !portrait_dir.is_dir() {
        return Err(GalleryError::config(format!(
            "The portrait path {} is invalid.",
            portrait_dir.display()
        )));
    }
    let data_file = expand_home(&cli.data_file);
    if !data_file.is_file() {
        return Err(GalleryError::config(format!(
            "The data file {} is invalid.",
            data_file.display()
        )));
    }

    let default_portrait = match &cli.default_portrait {
        Some(name) => {
            let path = portrait_dir.join(name);
            if !path.is_file() {
                return Err(GalleryError::config(format!(
                    "Default portrait {} not available. Aborting.",
                    path.display()
                )));
            }
            Some(path)
        }
        None => None,
    };

    let layout = match &cli.layout {
        Some(path) => LayoutParams::from_json_path(&expand_home(path))?,
        None => LayoutParams::default(),
    };
    let font = match &cli.font {
        Some(path) => Some(CaptionFont::from_path(&expand_home(path))?),
        None => CaptionFont::from_system(),
    };
    let out_dir = cli
        .out_dir
        .as_deref()
        .map(expand_home)
        .unwrap_or_else(std::env::temp_dir);

    let definition = GalleryDefinition::from_path(&data_file, &portrait_dir)?;

    let options = RunOptions {
        layout,
        font,
        default_portrait,
        out_dir,
        ..RunOptions::new(PathBuf::new())
    };
    let report = render_gallery(definition, &options)?;
    Ok(report.written.len())
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
