mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::Level;
use logger::CliLogger;
use pdf_sign::{
    EditingSession, FilterMode, GestureEvent, LopdfPageRenderer, OutboxManifest,
    OutboxUploadService, PageRenderer, SignOptions, SignatureLoad, load_pdf_bytes, read_pdf,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfsign", about = "Place signature images on PDF pages", version)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page count and display size of each page
    Inspect {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Display scale applied to page sizes in points
        #[arg(long)]
        scale: Option<f32>,
    },

    /// Place a signature on pages and submit the result
    Place {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Signature image (PNG, JPEG, GIF, BMP or WebP)
        #[arg(short, long)]
        signature: PathBuf,

        /// Page numbers to sign (1-based) - can specify multiple
        #[arg(short, long, required = true, num_args = 1..)]
        page: Vec<usize>,

        /// Move each signature by DX DY display pixels from its default spot
        #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
        offset: Option<Vec<f32>>,

        /// Processing mode (defaults to the config file's, else color)
        #[arg(long, value_enum)]
        filter: Option<FilterArg>,

        /// Options file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory the submission is written to
        #[arg(long)]
        outbox: PathBuf,

        /// Print placements only, don't submit
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Color,
    Gray,
    Bw,
}

impl From<FilterArg> for FilterMode {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Color => Self::Color,
            FilterArg::Gray => Self::Gray,
            FilterArg::Bw => Self::Bw,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = CliLogger::new(256, cli.verbose);
    logger
        .clone()
        .init()
        .context("Failed to install logger")?;

    let outcome = match cli.command {
        Commands::Inspect { input, scale } => inspect(input, scale).await,
        Commands::Place {
            input,
            signature,
            page,
            offset,
            filter,
            config,
            outbox,
            dry_run,
        } => {
            let args = PlaceArgs {
                input,
                signature,
                pages: page,
                offset: offset.map(|o| (o[0], o[1])),
                filter: filter.map(FilterMode::from),
                config,
                outbox,
                dry_run,
            };
            place(args).await
        }
    };

    let warnings = logger.entries_at(Level::Warn);
    if !cli.verbose && !warnings.is_empty() {
        eprintln!("{} warning(s) logged", warnings.len());
    }

    outcome
}

async fn inspect(input: PathBuf, scale: Option<f32>) -> Result<()> {
    let bytes = read_pdf(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let document = load_pdf_bytes(bytes).await?;

    let scale = scale.unwrap_or(SignOptions::default().render_scale);
    if !(scale.is_finite() && scale > 0.0) {
        bail!("Scale must be a positive number, got {}", scale);
    }
    let renderer = LopdfPageRenderer::new(&document)?.with_scale(scale);

    println!("{}", input.display());
    println!("  Pages: {}", renderer.page_count());
    println!("  Scale: {}", renderer.scale());
    for page in 0..renderer.page_count() {
        let (width_pt, height_pt) = renderer.page_size_pt(page)?;
        let surface = renderer.surface(page)?;
        println!(
            "  Page {}: {:.1} x {:.1} pt → {:.0} x {:.0} px",
            page + 1,
            width_pt,
            height_pt,
            surface.width,
            surface.height
        );
    }

    Ok(())
}

struct PlaceArgs {
    input: PathBuf,
    signature: PathBuf,
    pages: Vec<usize>,
    offset: Option<(f32, f32)>,
    filter: Option<FilterMode>,
    config: Option<PathBuf>,
    outbox: PathBuf,
    dry_run: bool,
}

async fn place(args: PlaceArgs) -> Result<()> {
    let options = match &args.config {
        Some(path) => SignOptions::load(path)
            .await
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => SignOptions::default(),
    };
    let filter = args.filter.unwrap_or(options.filter);

    let document = read_pdf(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut session = EditingSession::open(document, options).await?;

    let signature = tokio::fs::read(&args.signature)
        .await
        .with_context(|| format!("Failed to read {}", args.signature.display()))?;
    match session.load_signature(signature).await? {
        SignatureLoad::Ready { width, height } => {
            log::info!("Signature {}x{} px", width, height);
        }
        SignatureLoad::ProbeFailed => {
            log::warn!(
                "Could not read dimensions of {}, using a square signature",
                args.signature.display()
            );
        }
        SignatureLoad::Cleared => bail!("{} is empty", args.signature.display()),
    }

    for &number in &args.pages {
        let Some(page) = number.checked_sub(1) else {
            bail!("Page numbers start at 1");
        };
        session.add_overlay(page)?;

        if let Some((dx, dy)) = args.offset {
            session.handle_gesture(page, GestureEvent::DragMove { dx, dy })?;
            session.handle_gesture(page, GestureEvent::End)?;
        }
    }

    println!("{}", session.registry().to_json()?);
    for placement in session.placements() {
        let (width_pt, height_pt) = session.renderer().page_size_pt(placement.page)?;
        let rect = placement.to_pdf_rect(width_pt, height_pt);
        log::info!(
            "Page {}: [{:.1} {:.1} {:.1} {:.1}] pt",
            placement.page + 1,
            rect.left,
            rect.bottom,
            rect.right,
            rect.top
        );
    }

    if args.dry_run {
        return Ok(());
    }

    let outbox = OutboxUploadService::new(&args.outbox);
    let result = session.submit(&outbox, filter).await?;
    let manifest: OutboxManifest = serde_json::from_slice(&result)?;
    println!(
        "Submitted {} placement(s) ({}) → {}",
        manifest.placement_count,
        filter.as_str(),
        outbox.dir().display()
    );
    println!(
        "Result: {}",
        outbox.dir().join(&manifest.result_file).display()
    );

    Ok(())
}
