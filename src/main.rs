use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::Level;

use multifind::highlight::config::{load_engine_config, ConfigManager};
use multifind::highlight::{EngineConfig, EngineController, HighlightError, HighlightResult};
use multifind::mapping::{export_json, import_json, Color, Mapping, MappingSet};
use multifind::parsers::LiveDocument;
use multifind::ScanMode;

const STDIN_INPUT: &str = "-";

/// 在 HTML 文档中高亮关键词映射
#[derive(Parser, Debug)]
#[command(name = "multifind")]
#[command(about = "Highlight keyword groups and their mapped terms in an HTML document")]
#[command(version)]
struct Cli {
    /// HTML file to highlight, or "-" to read from stdin
    input: String,

    /// Mapping file (stored blob or exported bundle)
    #[arg(short, long, value_name = "FILE")]
    mappings: Option<PathBuf>,

    /// Inline mapping rule "search1;search2=mapped1;mapped2" (repeatable)
    #[arg(short, long = "term", value_name = "RULE")]
    terms: Vec<String>,

    /// Color for search terms given with --term
    #[arg(long, value_name = "COLOR")]
    search_color: Option<String>,

    /// Color for mapped terms given with --term
    #[arg(long, value_name = "COLOR")]
    mapped_color: Option<String>,

    /// Write highlighted HTML to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the effective mapping set as an export bundle
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Segment scan mode: cursor, gap-fill
    #[arg(long, value_name = "MODE")]
    scan_mode: Option<ScanMode>,

    /// Number of text nodes processed per idle chunk
    #[arg(long, value_name = "N")]
    chunk_size: Option<usize>,

    /// Charset of the input document
    #[arg(short, long, value_name = "CHARSET", default_value = "utf-8")]
    encoding: String,

    /// Print debug information to stderr
    #[arg(short, long, conflicts_with = "silent")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    silent: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    use multifind::env::{core::LogLevel, EnvVar};

    let level = if cli.silent {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        match LogLevel::get_or_default("warn".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> HighlightResult<()> {
    let config = resolve_config(cli)?;

    let mut mappings = match &cli.mappings {
        Some(path) => load_mapping_file(path)?,
        None => MappingSet::empty(),
    };
    for rule in &cli.terms {
        let mapping = parse_rule(rule, cli, &config)?;
        mappings = mappings.with_mapping(mapping)?;
    }
    tracing::info!("共 {} 组映射", mappings.len());

    if let Some(path) = &cli.export {
        fs::write(path, export_json(&mappings)?)?;
        tracing::info!("映射已导出到 {}", path.display());
    }

    let input = read_input(&cli.input)?;
    let document = LiveDocument::parse(&input, &cli.encoding)?;

    let mut engine = EngineController::new(document, config)?;
    engine.start(mappings)?;
    let report = engine.run_until_idle();
    engine.shutdown();

    tracing::info!(
        "高亮完成：{} 个文本节点，{} 个任务完成，{} 个任务中止",
        report.nodes_highlighted,
        report.passes_completed,
        report.passes_aborted
    );

    let html = engine.document().serialize(&cli.encoding)?;
    match &cli.output {
        Some(path) => fs::write(path, html)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&html)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> HighlightResult<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigManager::new(Some(path.as_str()))?.config().clone(),
        None => load_engine_config(None),
    };

    if let Some(scan_mode) = cli.scan_mode {
        config.scan_mode = scan_mode;
    }
    if let Some(chunk_size) = cli.chunk_size {
        config.chunk_size = chunk_size;
    }
    config.validate()?;

    Ok(config)
}

fn load_mapping_file(path: &Path) -> HighlightResult<MappingSet> {
    let content = fs::read_to_string(path)
        .map_err(|e| HighlightError::from(e).with_context(path.display()))?;
    import_json(&content).map_err(|e| e.with_context(path.display()))
}

fn parse_rule(rule: &str, cli: &Cli, config: &EngineConfig) -> HighlightResult<Mapping> {
    let (search, mapped) = rule.split_once('=').ok_or_else(|| {
        HighlightError::InvalidInput(format!("映射规则缺少 '=': {}", rule))
    })?;

    let search_color = cli
        .search_color
        .as_deref()
        .unwrap_or(&config.default_search_color);
    let mapped_color = cli
        .mapped_color
        .as_deref()
        .unwrap_or(&config.default_mapped_color);

    Mapping::from_lists(
        search,
        mapped,
        Color::from(search_color),
        Color::from(mapped_color),
    )
}

fn read_input(input: &str) -> HighlightResult<Vec<u8>> {
    if input == STDIN_INPUT {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        fs::read(input).map_err(|e| HighlightError::from(e).with_context(input))
    }
}
