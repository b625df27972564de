use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use fuse_finder::config::DiagramSettings;
use fuse_finder::diagram::FuseDiagram;
use fuse_finder::diagram::catalog::FuseTypeId;
use fuse_finder::diagram::events::DiagramInput;
use fuse_finder::diagram::svg::scene_to_svg;
use fuse_finder::diagram::viewer::run_viewer;
use fuse_finder::diagram::zone::{DiagramPoint, ZoneCategory};
use fuse_finder::lookup::load_fuse_location;
use fuse_finder::server::run_http_server;

#[derive(Debug, Parser)]
#[command(name = "fuse_finder", about = "Interactive fuse box location diagram")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the diagram once and print it.
    Render {
        #[arg(long, default_value = "unknown")]
        category: ZoneCategory,
        /// Fuse lookup file (.json/.yaml); its category overrides --category.
        #[arg(long)]
        lookup: Option<PathBuf>,
        /// Fuse type to open before replaying clicks.
        #[arg(long)]
        select: Option<FuseTypeId>,
        /// Diagram-space click `X,Y`; may be repeated.
        #[arg(long = "click", value_parser = parse_click)]
        clicks: Vec<DiagramPoint>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Open the native interactive viewer.
    View {
        #[arg(long, default_value = "unknown")]
        category: ZoneCategory,
        #[arg(long)]
        lookup: Option<PathBuf>,
    },
    /// Serve rendered diagrams over HTTP.
    Serve {
        /// Overrides FUSE_BIND.
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = DiagramSettings::from_env().context("failed to load configuration")?;
    let _log_guard = init_tracing(&settings)?;

    match cli.command {
        Commands::Render {
            category,
            lookup,
            select,
            clicks,
            format,
            output,
        } => {
            let category = match lookup {
                Some(path) => load_fuse_location(&path)?.location_category,
                None => category,
            };
            let rendered = render_once(category, select, &clicks, format)?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write `{}`", path.display()))?;
                    info!(path = %path.display(), %category, "wrote diagram");
                }
                None => println!("{rendered}"),
            }
        }
        Commands::View { category, lookup } => {
            let lookup = lookup
                .map(|path| load_fuse_location(&path))
                .transpose()?;
            run_viewer(&settings, category, lookup)?;
        }
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                settings.bind = bind;
            }
            run_http_server(&settings).await?;
        }
    }

    Ok(())
}

fn render_once(
    category: ZoneCategory,
    select: Option<FuseTypeId>,
    clicks: &[DiagramPoint],
    format: OutputFormat,
) -> Result<String> {
    let mut diagram = FuseDiagram::new(category);
    if let Some(fuse) = select {
        diagram.apply(DiagramInput::ClickIcon { fuse });
    }
    for point in clicks {
        diagram.click(*point);
    }

    let scene = diagram.scene();
    match format {
        OutputFormat::Svg => Ok(scene_to_svg(&scene)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&scene).context("failed to serialize diagram scene")
        }
    }
}

fn parse_click(value: &str) -> Result<DiagramPoint, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y`, got `{value}`"))?;
    let x = x
        .trim()
        .parse::<f32>()
        .map_err(|error| format!("invalid x coordinate `{x}`: {error}"))?;
    let y = y
        .trim()
        .parse::<f32>()
        .map_err(|error| format!("invalid y coordinate `{y}`: {error}"))?;
    Ok(DiagramPoint::new(x, y))
}

fn init_tracing(settings: &DiagramSettings) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fuse_finder=debug"));

    let (file_layer, guard) = match &settings.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "fuse_finder.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .with(file_layer)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(guard)
}
