use attend_qr::scanner::ScanSession;
use attend_qr::tools::{load_rgb, save_bitmap_png};
use attend_qr::{MatrixEncoder, Renderer, ident};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "attendtool", version, about = "AttendQR CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payload into a badge PNG
    Encode {
        #[arg(long)]
        text: String,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 300)]
        size: usize,
    },
    /// Scan an uploaded image for a badge
    Scan {
        #[arg(long)]
        image: PathBuf,
        /// Known registration ids, comma separated
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
        #[arg(long, default_value = "http://localhost:3000")]
        base_url: String,
    },
    /// Print a fresh registration id
    NewId,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode { text, out, size } => encode_cmd(&text, &out, size),
        Command::Scan {
            image,
            ids,
            base_url,
        } => scan_cmd(&image, ids, &base_url),
        Command::NewId => {
            println!("{}", ident::registration_id());
            ExitCode::SUCCESS
        }
    }
}

fn encode_cmd(text: &str, out: &PathBuf, size: usize) -> ExitCode {
    let matrix = MatrixEncoder::encode(text);
    let bitmap = Renderer::render(&matrix, size);
    if let Err(err) = save_bitmap_png(&bitmap, out) {
        eprintln!("Failed to write {}: {err}", out.display());
        return ExitCode::FAILURE;
    }
    println!("Wrote {} ({size}x{size})", out.display());
    // Echo the payload so it can be copied alongside the image
    println!("Payload: {text}");
    ExitCode::SUCCESS
}

fn scan_cmd(image: &PathBuf, ids: Vec<String>, base_url: &str) -> ExitCode {
    let (rgb, width, height) = match load_rgb(image) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("Failed to load {}: {err}", image.display());
            return ExitCode::FAILURE;
        }
    };

    let session = ScanSession::new(ids, base_url);
    match session.process_rgb(&rgb, width, height) {
        Some(detection) => {
            println!("Detected: {}", detection.content);
            println!(
                "  candidates: {:?}",
                detection
                    .candidates
                    .iter()
                    .map(|c| (c.x, c.y))
                    .collect::<Vec<_>>()
            );
            println!(
                "  complexity: {} high-contrast: {}",
                detection.complexity, detection.high_contrast
            );
            ExitCode::SUCCESS
        }
        None => {
            println!("No badge detected in {}", image.display());
            ExitCode::FAILURE
        }
    }
}
