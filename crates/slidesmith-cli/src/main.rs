use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use slidesmith_config::Config;
use slidesmith_engine::deck::templates::default_document;
use slidesmith_engine::fragments::{EquationAlignment, EquationConfig, EquationDisplay, TableConfig, TableStyle};
use slidesmith_engine::{
    delete_slide, duplicate_slide, io, reorder_slides, update_page_numbers,
};
use std::path::{Path, PathBuf};
use std::process;

mod browse;
mod commands;

#[derive(Parser)]
#[command(name = "slidesmith")]
#[command(version)]
#[command(about = "Edit and check single-file HTML slide decks", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/slidesmith/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the starter deck to FILE
    New {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check a deck and print diagnostics
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List slides with their titles
    Slides {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Move slide FROM so it ends up at position TO (1-based)
    Reorder {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        from: usize,
        to: usize,
    },

    /// Delete a slide (1-based)
    Delete {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        slide: usize,
    },

    /// Copy a slide to just after itself (1-based)
    Duplicate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        slide: usize,
    },

    /// Add a slide from a template
    AddSlide {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Template id: standard, title, two-column, image-text, quote
        #[arg(short, long)]
        template: Option<String>,

        /// Insert after this slide instead of at the end
        #[arg(long, value_name = "SLIDE")]
        after: Option<usize>,
    },

    /// Rewrite every footer page number
    Renumber {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Insert a placeholder table into a slide
    InsertTable {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target slide (1-based)
        #[arg(short, long, default_value_t = 1)]
        slide: usize,

        #[arg(long, default_value_t = 3)]
        rows: usize,

        #[arg(long, default_value_t = 3)]
        columns: usize,

        #[arg(long, default_value_t = TableStyle::Simple)]
        style: TableStyle,

        /// Leave out the header row
        #[arg(long)]
        no_header: bool,

        #[arg(long)]
        caption: Option<String>,
    },

    /// Insert a LaTeX equation into a slide
    InsertEquation {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        latex: String,

        /// Target slide (1-based)
        #[arg(short, long, default_value_t = 1)]
        slide: usize,

        /// Inline span instead of a block
        #[arg(long)]
        inline: bool,

        #[arg(long, default_value_t = EquationAlignment::Center)]
        align: EquationAlignment,

        #[arg(long)]
        caption: Option<String>,

        #[arg(long)]
        label: Option<String>,
    },

    /// Print the element tree
    Outline {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Browse and rearrange slides in the terminal
    Browse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => {
            let config = Config::load_from_path(path)?;
            if config.is_none() {
                bail!("config file '{}' not found", path.display());
            }
            config
        }
        None => Config::load()?,
    };
    log::debug!("Config path: {}", Config::config_path().display());
    Ok(loaded.unwrap_or_default())
}

fn read(path: &Path) -> Result<String> {
    io::read_document(path).with_context(|| format!("reading {}", path.display()))
}

fn write(path: &Path, content: &str) -> Result<()> {
    io::write_document(path, content).with_context(|| format!("writing {}", path.display()))
}

/// Applies `edit` to the deck at `path` and writes the result back.
fn edit_in_place(path: &Path, edit: impl FnOnce(&str) -> Result<String>) -> Result<i32> {
    let doc = read(path)?;
    let updated = edit(&doc)?;
    if updated == doc {
        log::info!("{} unchanged", path.display());
    } else {
        write(path, &updated)?;
    }
    Ok(0)
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::New { file, force } => {
            if file.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", file.display());
            }
            write(&file, &default_document())?;
            println!("created {}", file.display());
            Ok(0)
        }
        Commands::Validate { file, json } => {
            let doc = read(&file)?;
            let (report, has_errors) = commands::validate(&doc, &config.validator()?, json)?;
            print!("{report}");
            if json {
                println!();
            }
            Ok(if has_errors { 1 } else { 0 })
        }
        Commands::Slides { file } => {
            print!("{}", commands::list_slides(&read(&file)?));
            Ok(0)
        }
        Commands::Reorder { file, from, to } => edit_in_place(&file, |doc| {
            let from = commands::slide_index(doc, from)?;
            let to = commands::slide_index(doc, to)?;
            Ok(reorder_slides(doc, from, to))
        }),
        Commands::Delete { file, slide } => edit_in_place(&file, |doc| {
            Ok(delete_slide(doc, commands::slide_index(doc, slide)?))
        }),
        Commands::Duplicate { file, slide } => edit_in_place(&file, |doc| {
            Ok(duplicate_slide(doc, commands::slide_index(doc, slide)?))
        }),
        Commands::AddSlide {
            file,
            template,
            after,
        } => edit_in_place(&file, |doc| {
            commands::add_slide(doc, template.as_deref(), after)
        }),
        Commands::Renumber { file } => edit_in_place(&file, |doc| Ok(update_page_numbers(doc))),
        Commands::InsertTable {
            file,
            slide,
            rows,
            columns,
            style,
            no_header,
            caption,
        } => {
            let table = TableConfig {
                rows,
                columns,
                style,
                has_header: !no_header,
                caption,
            };
            edit_in_place(&file, |doc| commands::insert_table(doc, slide, &table))
        }
        Commands::InsertEquation {
            file,
            latex,
            slide,
            inline,
            align,
            caption,
            label,
        } => {
            let equation = EquationConfig {
                latex,
                display: if inline {
                    EquationDisplay::Inline
                } else {
                    EquationDisplay::Block
                },
                alignment: align,
                caption,
                label,
            };
            edit_in_place(&file, |doc| commands::insert_equation(doc, slide, &equation))
        }
        Commands::Outline { file } => {
            print!("{}", commands::outline(&read(&file)?));
            Ok(0)
        }
        Commands::Browse { file } => {
            browse::run(file, config.validator()?)?;
            Ok(0)
        }
    }
}
