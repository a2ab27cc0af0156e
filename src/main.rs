//! SearchPad CLI
//!
//! Command-line front end for the search-screen core.
//! Exercises the history store against a blob on disk and renders
//! flow layouts as plain text.

use clap::{Parser, Subcommand};
use console::style;
use searchpad::{
    rank_color, ColorPool, FlowLayout, LayoutParams, Margins, SearchHistoryStore, Tag, TagStyle,
    WhitespacePolicy, DEFAULT_CAPACITY, DEFAULT_HISTORY_FILE,
};
use std::path::PathBuf;

/// SearchPad - tag flow layout and persisted search history
#[derive(Parser)]
#[command(name = "searchpad")]
#[command(author = "SearchPad Contributors")]
#[command(version)]
#[command(about = "Search-screen core: tag flow layout and search history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a query in the history blob
    Record {
        /// Query text
        text: String,

        /// History blob path
        #[arg(short, long, default_value = DEFAULT_HISTORY_FILE)]
        path: PathBuf,

        /// Retention capacity
        #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
        capacity: usize,

        /// Keep whitespace instead of removing it
        #[arg(long)]
        keep_whitespace: bool,
    },

    /// Print the recorded history, most recent first
    History {
        /// History blob path
        #[arg(short, long, default_value = DEFAULT_HISTORY_FILE)]
        path: PathBuf,
    },

    /// Remove one entry from the history
    Remove {
        /// Query text to remove (exact match)
        text: String,

        /// History blob path
        #[arg(short, long, default_value = DEFAULT_HISTORY_FILE)]
        path: PathBuf,
    },

    /// Empty the history
    Clear {
        /// History blob path
        #[arg(short, long, default_value = DEFAULT_HISTORY_FILE)]
        path: PathBuf,
    },

    /// Lay tags out into rows and print their frames
    Layout {
        /// Tag texts, in placement order
        #[arg(required = true)]
        tags: Vec<String>,

        /// Container width in points
        #[arg(short, long, default_value = "320")]
        width: f32,

        /// Tag style (normal, colorful, border, animated-border, rank, rectangle)
        #[arg(short, long, default_value = "normal", value_parser = parse_style)]
        style: TagStyle,

        /// Horizontal spacing between tags
        #[arg(long, default_value = "10")]
        h_spacing: f32,

        /// Vertical spacing between rows
        #[arg(long, default_value = "10")]
        v_spacing: f32,

        /// Uniform outer margin
        #[arg(long, default_value = "10")]
        margin: f32,
    },
}

fn main() {
    searchpad::logging::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Record {
            text,
            path,
            capacity,
            keep_whitespace,
        } => cmd_record(&text, path, capacity, keep_whitespace),

        Commands::History { path } => cmd_history(path),

        Commands::Remove { text, path } => cmd_remove(&text, path),

        Commands::Clear { path } => cmd_clear(path),

        Commands::Layout {
            tags,
            width,
            style,
            h_spacing,
            v_spacing,
            margin,
        } => cmd_layout(&tags, width, style, h_spacing, v_spacing, margin),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn open_store(path: PathBuf, capacity: usize, keep_whitespace: bool) -> searchpad::Result<SearchHistoryStore> {
    let policy = if keep_whitespace {
        WhitespacePolicy::Keep
    } else {
        WhitespacePolicy::RemoveAll
    };
    SearchHistoryStore::open(path, capacity, policy)
}

fn cmd_record(
    text: &str,
    path: PathBuf,
    capacity: usize,
    keep_whitespace: bool,
) -> searchpad::Result<()> {
    let mut store = open_store(path, capacity, keep_whitespace)?;
    let update = store.record_query(text);

    if let Some(warning) = update.persist_warning {
        eprintln!("{} {}", style("Warning:").yellow().bold(), warning);
    }
    print_history(&update.entries);
    Ok(())
}

fn cmd_history(path: PathBuf) -> searchpad::Result<()> {
    let store = SearchHistoryStore::open_default(path)?;
    print_history(store.current_history());
    Ok(())
}

fn cmd_remove(text: &str, path: PathBuf) -> searchpad::Result<()> {
    let mut store = SearchHistoryStore::open_default(path)?;
    let update = store.remove_query(text);

    if let Some(warning) = update.persist_warning {
        eprintln!("{} {}", style("Warning:").yellow().bold(), warning);
    }
    print_history(&update.entries);
    Ok(())
}

fn cmd_clear(path: PathBuf) -> searchpad::Result<()> {
    let mut store = SearchHistoryStore::open_default(path)?;
    let update = store.clear();

    if let Some(warning) = update.persist_warning {
        eprintln!("{} {}", style("Warning:").yellow().bold(), warning);
    }
    println!("{}", style("History cleared").green());
    Ok(())
}

fn parse_style(s: &str) -> Result<TagStyle, String> {
    s.parse()
}

fn cmd_layout(
    tags: &[String],
    width: f32,
    tag_style: TagStyle,
    h_spacing: f32,
    v_spacing: f32,
    margin: f32,
) -> searchpad::Result<()> {
    let input: Vec<Tag> = tags
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let tag = Tag::new(text.clone()).with_style(tag_style);
            if tag_style == TagStyle::Rank {
                tag.with_rank(i as u32 + 1)
            } else {
                tag
            }
        })
        .collect();

    let engine = FlowLayout::new().with_params(LayoutParams {
        h_spacing,
        v_spacing,
        margins: Margins::uniform(margin),
    });
    let result = engine.layout(&input, width)?;

    println!(
        "{} {} tag(s), {} row(s), content height {:.1}",
        style("Layout:").cyan().bold(),
        result.placed.len(),
        result.row_count(),
        result.total_height
    );
    let pool = ColorPool::default();
    for placed in &result.placed {
        let decoration = match tag_style {
            TagStyle::Colorful => format!("  fill {}", pool.color_for(&placed.tag.text)),
            TagStyle::Rank => placed
                .tag
                .rank
                .map(|r| format!("  badge {}", rank_color(r)))
                .unwrap_or_default(),
            _ => String::new(),
        };
        println!(
            "  row {}  x={:<7.1} y={:<7.1} w={:<7.1} h={:<5.1}  '{}'{}",
            placed.row,
            placed.frame.x,
            placed.frame.y,
            placed.frame.width,
            placed.frame.height,
            placed.display_text,
            decoration
        );
    }
    Ok(())
}

fn print_history(entries: &[String]) {
    if entries.is_empty() {
        println!("{}", style("(no search history)").dim());
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{:>3}. {}", i + 1, entry);
    }
}
