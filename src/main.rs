use anyhow::{Context, Result};
use clap::Parser;
use langtree::newick::write_newick;
use langtree::pipeline::{process_search, PipelineConfig, SearchResult};
use langtree::render::svg::save_svg;
use log::info;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Draws the language trees of a search result as SVG, one file per tree.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search result as JSON (`finalResult`, `isocodes`, `codeCount`)
    input: PathBuf,

    /// Directory the SVG files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Pipeline configuration as JSON; flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width of the tree drawing, without labels
    #[arg(long)]
    width: Option<f64>,

    /// Remove internal nodes with a single child after pruning
    #[arg(long)]
    collapse_unary: bool,

    /// Also print the pruned trees as Newick strings to stdout
    #[arg(long)]
    newick: bool,
}

fn main() -> Result<()> {
    let _ = env_logger::builder().format_timestamp(None).try_init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let result = SearchResult::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read search result {}", args.input.display()))?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let mut num_written = 0;
    let mut stdout = io::stdout().lock();
    for processed in process_search(&result, &config).into_iter().flatten() {
        if processed.rendered.is_empty() {
            continue;
        }
        let path = args.out_dir.join(format!("tree_{}.svg", processed.index));
        save_svg(&path, &processed.rendered, &config.render)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        num_written += 1;

        if args.newick {
            write_newick(&mut stdout, std::slice::from_ref(&processed.tree))?;
        }
    }

    info!(
        "Wrote {num_written} of {} trees to {}",
        result.final_result.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Invalid configuration {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };
    if let Some(width) = args.width {
        config.layout = config.layout.with_width(width);
    }
    if args.collapse_unary {
        config.collapse_unary = true;
    }
    Ok(config)
}
