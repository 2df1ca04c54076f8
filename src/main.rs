//! metasnap CLI - SEO Meta Tag Result Viewer
//!
//! Renders analysis results from the meta tag analyzer as reports or serves
//! them as a web page.
//!
//! Usage:
//!   metasnap render [OPTIONS] [INPUT]
//!   metasnap serve [OPTIONS] [INPUT]

use std::fs::File;
use std::io::{BufWriter, Write, stdin, stdout};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use metasnap::{
    AnalysisResult, CompiledConfig, OutputFormat, ResultView, generate_json_output,
    generate_markdown_report, generate_text_report, load_compiled_config,
    web::{PageOptions, ServerConfig, render_html_page, start_server},
};

/// metasnap - See how your page looks to search engines and social networks
#[derive(Parser, Debug)]
#[command(name = "metasnap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render an analysis result as a report
    Render(RenderArgs),
    /// Serve an analysis result as a web page
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Analysis result JSON file ("-" or absent: read stdin)
    input: Option<PathBuf>,

    /// Output format: text, markdown (md), json, html (default: text)
    #[arg(short, long)]
    format: Option<String>,

    /// Output file for the report (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file path (default: search for .metasnap.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Analysis result JSON file to preload ("-" reads stdin)
    input: Option<PathBuf>,

    /// Port for web server (default: 3000)
    #[arg(long)]
    port: Option<u16>,

    /// Don't open browser automatically when starting web server
    #[arg(long)]
    no_open: bool,

    /// Config file path (default: search for .metasnap.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => {
            init_logging(args.verbose);
            run_render(args)
        }
        Commands::Serve(args) => {
            init_logging(args.verbose);
            run_serve(args)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Directory the config search starts from
fn config_start(input: Option<&Path>) -> PathBuf {
    match input {
        Some(path) if path != Path::new("-") => path.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn load_config(
    explicit: Option<&Path>,
    input: Option<&Path>,
) -> Result<CompiledConfig, Box<dyn std::error::Error>> {
    match load_compiled_config(explicit, &config_start(input)) {
        Ok(config) => Ok(config),
        // An explicitly named config must load
        Err(e) if explicit.is_some() => Err(e.into()),
        Err(e) => {
            tracing::warn!("No config file loaded: {}", e);
            Ok(CompiledConfig::empty())
        }
    }
}

fn read_input(input: Option<&Path>) -> Result<AnalysisResult, Box<dyn std::error::Error>> {
    let result = match input {
        Some(path) if path != Path::new("-") => {
            tracing::debug!("Reading analysis result from {}", path.display());
            AnalysisResult::from_file(path)?
        }
        _ => {
            tracing::debug!("Reading analysis result from stdin");
            AnalysisResult::from_reader(stdin().lock())?
        }
    };
    tracing::debug!(
        "Loaded result: score {}, {} tags",
        result.score,
        result.meta.len()
    );
    Ok(result)
}

fn run_render(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref(), args.input.as_deref())?;

    // CLI args override config, which overrides defaults
    let format = match &args.format {
        Some(name) => {
            OutputFormat::parse(name).ok_or_else(|| format!("Unknown output format: {}", name))?
        }
        None => config.format,
    };

    let result = read_input(args.input.as_deref())?;
    let view = ResultView::render_with_options(&result, &config.view_options());

    let output: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(stdout()),
    };

    let mut writer = output;

    match format {
        OutputFormat::Text => generate_text_report(&view, &mut writer)?,
        OutputFormat::Markdown => generate_markdown_report(&view, &mut writer)?,
        OutputFormat::Json => generate_json_output(&view, &mut writer)?,
        OutputFormat::Html => {
            let html = render_html_page(Some(&view), PageOptions::default());
            writer.write_all(html.as_bytes())?;
        }
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        eprintln!("Report written to: {}", path.display());
    }

    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref(), args.input.as_deref())?;

    let initial = match &args.input {
        Some(_) => Some(read_input(args.input.as_deref())?),
        None => None,
    };

    let mut server_config = ServerConfig::from(&config);
    if let Some(port) = args.port {
        server_config.port = port;
    }
    if args.no_open {
        server_config.open_browser = false;
    }

    // Run the web server using tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(start_server(initial, config.view_options(), server_config))
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    Ok(())
}
