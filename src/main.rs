use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pixicon::api;
use pixicon::models::AppConfig;
use pixicon::server;
use sketchfx::{compose_icon, pixelate, ColorSpec, IconOptions, PixelateOptions};

#[derive(Parser)]
#[command(name = "pixicon")]
#[command(about = "Turn raster sketches into flat icons and pixel art")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render a flat-color icon from an image file
    Iconize {
        /// Input image (PNG, JPEG, GIF, BMP or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Foreground color (hex string or CSS name)
        #[arg(long, default_value = "#111111")]
        fg: String,

        /// Background color, or "none" for transparent
        #[arg(long, default_value = "none")]
        bg: String,

        /// Stroke color
        #[arg(long, default_value = "#000000")]
        stroke_color: String,

        /// Luma cut separating ink from background (0-255)
        #[arg(short, long, default_value_t = 200)]
        threshold: i32,

        /// Outline width in pixels (0 disables)
        #[arg(short, long, default_value_t = 0)]
        stroke: u32,
    },
    /// Render a pixel-art version of an image file
    Pixelate {
        /// Input image (PNG, JPEG, GIF, BMP or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of palette colors (2-64)
        #[arg(long, default_value_t = 8)]
        palette_size: u32,

        /// Edge length of the square pixel blocks
        #[arg(long, default_value_t = 8)]
        pixel_size: u32,

        /// Apply error-diffusion dithering
        #[arg(long)]
        dither: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pixicon API",
        description = "Turn raster sketches into flat icons and pixel art",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_iconize, api::handle_pixelate),
    components(schemas(
        api::IconizeForm,
        api::PixelateForm,
        pixicon::error::ErrorResponse,
    )),
    tags(
        (name = "Transforms", description = "Image transform endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Iconize {
            input,
            output,
            fg,
            bg,
            stroke_color,
            threshold,
            stroke,
        }) => run_iconize(&input, &output, &fg, &bg, &stroke_color, threshold, stroke),
        Some(Commands::Pixelate {
            input,
            output,
            palette_size,
            pixel_size,
            dither,
        }) => run_pixelate(&input, &output, palette_size, pixel_size, dither),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Run the iconize pipeline on a file (no server needed)
fn run_iconize(
    input: &PathBuf,
    output: &PathBuf,
    fg: &str,
    bg: &str,
    stroke_color: &str,
    threshold: i32,
    stroke_px: u32,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let foreground = match fg.parse::<ColorSpec>()? {
        ColorSpec::Solid(color) => color,
        ColorSpec::Transparent => anyhow::bail!("--fg must be a concrete color"),
    };
    let stroke_color = match stroke_color.parse::<ColorSpec>()? {
        ColorSpec::Solid(color) => color,
        ColorSpec::Transparent => anyhow::bail!("--stroke-color must be a concrete color"),
    };
    let background = bg.parse::<ColorSpec>()?;

    let image = image::open(input)?;
    let options = IconOptions {
        foreground,
        background,
        stroke_color,
        threshold,
        stroke_px,
    };

    let icon = compose_icon(&image, &options);
    let (width, height) = icon.dimensions();
    image::DynamicImage::ImageRgba8(icon).save(output)?;
    println!("Wrote {} ({width}x{height})", output.display());

    Ok(())
}

/// Run the pixelate pipeline on a file (no server needed)
fn run_pixelate(
    input: &PathBuf,
    output: &PathBuf,
    palette_size: u32,
    pixel_size: u32,
    dither: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let image = image::open(input)?;
    let options = PixelateOptions {
        palette_size,
        block_size: pixel_size,
        dither,
    };

    let blocked = pixelate(&image, &options)?;
    let (width, height) = blocked.dimensions();
    image::DynamicImage::ImageRgb8(blocked).save(output)?;
    println!("Wrote {} ({width}x{height})", output.display());

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let static_dir = std::env::var("STATIC_DIR").ok();
    let max_upload = std::env::var("MAX_UPLOAD_BYTES").ok();

    println!("Pixicon v{VERSION}");
    println!("Turn raster sketches into flat icons and pixel art\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR        = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  STATIC_DIR       = {}",
        static_dir.as_deref().unwrap_or("./static (default)")
    );
    println!(
        "  MAX_UPLOAD_BYTES = {}",
        max_upload.as_deref().unwrap_or("26214400 (default)")
    );

    println!("\nCommands:");
    println!("  pixicon serve      Start the HTTP server");
    println!("  pixicon iconize    Render a flat-color icon from a file");
    println!("  pixicon pixelate   Render pixel art from a file");
    println!("\nRun 'pixicon --help' for more details.");
}

/// Minimal logging for the file-based CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixicon=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixicon=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let static_dir = config.static_dir.clone();

    tracing::info!(
        static_dir = %static_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        "Configuration resolved"
    );

    let state = server::create_app_state(config);

    let app = server::build_router(state)
        // OpenAPI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Frontend files (index.html, script.js, styles.css)
        .fallback_service(ServeDir::new(static_dir));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Pixicon server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
