use crate::config::{Config, load_config};
use crate::dataset::load_dataset;
use crate::graph::Graph;
use crate::layout::compute_layout;
use crate::layout_dump::{write_adjacency, write_layout_dump};
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "proofmap", version, about = "Lay out proof numbering schemes as zigzag node graphs")]
pub struct Args {
    /// Dataset file (JSON or JSON5 array of node records)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (draw, layout and render settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Plot only these chapters, in this order (comma separated)
    #[arg(long = "chapters", value_delimiter = ',')]
    pub chapters: Option<Vec<String>>,

    /// Skip these chapters when plotting everything (comma separated)
    #[arg(long = "exclude", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Reduced-fidelity overview rendering
    #[arg(long = "minimap")]
    pub minimap: bool,

    /// Also write the adjacency list as JSON to this path
    #[arg(long = "adjacency")]
    pub adjacency: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = resolve_config(&args)?;
    let store = load_dataset(&args.input)?;
    let graph = Graph::new(store)?;

    if let Some(path) = args.adjacency.as_deref() {
        write_adjacency(Some(path), &graph)?;
    }

    let layout = compute_layout(&graph, &config.layout);
    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.draw);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(args.output.as_deref(), "png")?;
            let svg = render_svg(&layout, &config.draw);
            write_output_png(&svg, &output, &config.render)?;
        }
        OutputFormat::Json => {
            write_layout_dump(args.output.as_deref(), &layout)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Config file first, then command-line overrides.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = if args.minimap && args.config.is_none() {
        Config::minimap()
    } else {
        load_config(args.config.as_deref())?
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if args.minimap {
        config.draw.minimap = true;
    }
    if let Some(chapters) = &args.chapters {
        config.layout.chapters = Some(chapters.clone());
    }
    if !args.exclude.is_empty() {
        config.layout.excluded_chapters = args.exclude.clone();
    }
}

fn ensure_output(output: Option<&Path>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.to_path_buf());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn parses_chapter_lists() {
        let args = parse(&[
            "proofmap", "-i", "data.json", "--chapters", "24,25", "--exclude", "8,89",
        ]);
        assert_eq!(args.chapters, Some(vec!["24".to_string(), "25".to_string()]));
        assert_eq!(args.exclude, vec!["8", "89"]);
        assert_eq!(args.output_format, OutputFormat::Svg);
    }

    #[test]
    fn minimap_flag_selects_minimap_preset() {
        let args = parse(&["proofmap", "-i", "data.json", "--minimap", "-vv"]);
        let config = resolve_config(&args).unwrap();
        assert!(config.draw.minimap);
        assert_eq!(config.layout.pad, 10.0);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn overrides_replace_config_selection() {
        let args = parse(&["proofmap", "-i", "d.json", "--exclude", "8", "-e", "json"]);
        let mut config = Config::default();
        config.layout.excluded_chapters = vec!["1".to_string()];
        apply_overrides(&mut config, &args);
        assert_eq!(config.layout.excluded_chapters, vec!["8"]);
        assert!(config.layout.chapters.is_none());
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(None, "png").is_err());
        assert_eq!(
            ensure_output(Some(Path::new("out.png")), "png").unwrap(),
            PathBuf::from("out.png")
        );
    }
}
