use clap::{Parser, Subcommand};
use rust_qrcode::tools::{load_overlay, module_stats, parse_size, save_png};
use rust_qrcode::{
    ECLevel, Overlay, RenderConfig, Rgba, Symbol, VersionChoice, encode, models::latin1_bytes,
    read_symbol, sample_rendered,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code generator tools")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SymbolArgs {
    /// Payload text, encoded as ISO-8859-1
    #[arg(long)]
    text: String,
    /// Error correction level (L, M, Q, H)
    #[arg(long, default_value = "L")]
    ec: ECLevel,
    /// Fixed version 1-40 (smallest fitting version when omitted)
    #[arg(long)]
    version: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and write a PNG
    Encode {
        #[command(flatten)]
        symbol: SymbolArgs,
        #[arg(long)]
        out: PathBuf,
        /// Output size as WxH or N
        #[arg(long, default_value = "200x200")]
        size: String,
        #[arg(long, default_value = "000")]
        fg: Rgba,
        #[arg(long, default_value = "fff")]
        bg: Rgba,
        /// Light margin in modules
        #[arg(long, default_value_t = 4)]
        quiet_zone: u32,
        /// Image composited over the center
        #[arg(long)]
        overlay: Option<PathBuf>,
        /// Share of the error correction budget the overlay may cover
        #[arg(long, default_value_t = 0.5)]
        overlay_fraction: f64,
    },
    /// Print the symbol as text with its parameters
    Inspect {
        #[command(flatten)]
        symbol: SymbolArgs,
    },
    /// Encode, render, sample and read back the payload
    Verify {
        #[command(flatten)]
        symbol: SymbolArgs,
        #[arg(long, default_value = "400x400")]
        size: String,
        #[arg(long, default_value_t = 4)]
        quiet_zone: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let result = match cli.command {
        Command::Encode {
            symbol,
            out,
            size,
            fg,
            bg,
            quiet_zone,
            overlay,
            overlay_fraction,
        } => encode_cmd(
            &symbol,
            &out,
            &size,
            (fg, bg),
            quiet_zone,
            overlay.as_deref().map(|p| (p, overlay_fraction)),
        ),
        Command::Inspect { symbol } => inspect_cmd(&symbol),
        Command::Verify {
            symbol,
            size,
            quiet_zone,
        } => verify_cmd(&symbol, &size, quiet_zone),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn build_symbol(args: &SymbolArgs) -> Result<Symbol, String> {
    let payload = latin1_bytes(&args.text).map_err(|e| e.to_string())?;
    let version = args.version.map_or(VersionChoice::Auto, VersionChoice::Exact);
    encode(&payload, args.ec, version).map_err(|e| e.to_string())
}

fn encode_cmd(
    args: &SymbolArgs,
    out: &Path,
    size: &str,
    (fg, bg): (Rgba, Rgba),
    quiet_zone: u32,
    overlay: Option<(&Path, f64)>,
) -> Result<(), String> {
    let (width, height) = parse_size(size).map_err(|e| e.to_string())?;
    let start = Instant::now();
    let symbol = build_symbol(args)?;

    let mut config = RenderConfig::new(width, height)
        .with_colors(fg, bg)
        .with_quiet_zone(quiet_zone);
    if let Some((path, fraction)) = overlay {
        let image = load_overlay(path)
            .map_err(|e| format!("failed to load overlay {}: {e}", path.display()))?;
        config = config.with_overlay(Overlay::new(image, fraction));
    }

    let image = symbol.render(&config).map_err(|e| e.to_string())?;
    save_png(&image, out).map_err(|e| format!("failed to write {}: {e}", out.display()))?;
    println!(
        "Wrote {} ({}x{}, version {}, level {}, mask {}) in {:.2?}",
        out.display(),
        width,
        height,
        symbol.version(),
        symbol.ec_level(),
        symbol.mask().bits(),
        start.elapsed()
    );
    Ok(())
}

fn inspect_cmd(args: &SymbolArgs) -> Result<(), String> {
    let symbol = build_symbol(args)?;
    println!("{}", symbol.to_ascii(2));
    let stats = module_stats(symbol.matrix());
    println!(
        "version={} dimension={} ec={} ({:.0}%) mask={}",
        symbol.version(),
        symbol.dimension(),
        symbol.ec_level(),
        symbol.ec_level().percent_correction() * 100.0,
        symbol.mask().bits()
    );
    println!(
        "bits used={} capacity={} ({:.1}% full)",
        symbol.encoded_bits(),
        symbol.data_capacity_bits(),
        100.0 * symbol.encoded_bits() as f64 / symbol.data_capacity_bits() as f64
    );
    println!(
        "dark modules={}/{} ({:.1}%)",
        stats.dark_modules,
        stats.total_modules,
        stats.dark_ratio * 100.0
    );
    Ok(())
}

fn verify_cmd(args: &SymbolArgs, size: &str, quiet_zone: u32) -> Result<(), String> {
    let (width, height) = parse_size(size).map_err(|e| e.to_string())?;
    let symbol = build_symbol(args)?;
    let config = RenderConfig::new(width, height).with_quiet_zone(quiet_zone);
    let image = symbol.render(&config).map_err(|e| e.to_string())?;
    let sampled = sample_rendered(&image, symbol.dimension(), &config).map_err(|e| e.to_string())?;
    let readback = read_symbol(&sampled).map_err(|e| e.to_string())?;

    let expected = latin1_bytes(&args.text).map_err(|e| e.to_string())?;
    if readback.payload != expected {
        return Err(format!(
            "payload mismatch: read {} bytes, expected {}",
            readback.payload.len(),
            expected.len()
        ));
    }
    println!(
        "OK: version {} level {} mask {}, {} codewords corrected",
        readback.version,
        readback.ec_level,
        readback.mask.bits(),
        readback.corrected
    );
    Ok(())
}
