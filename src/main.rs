//! Axes Positioner CLI
//!
//! Usage:
//!   axpos [OPTIONS] <COMMAND>
//!
//! Commands:
//!   grid      Print a grid of placeholder panels
//!   subplots  Print shared-axis subplot positions
//!   edit      Apply edits to a layout file
//!   show      Print anchor-relative coordinates of every panel
//!   render    Print an SVG preview of a layout file
//!
//! Options:
//!   --settings <FILE>  Settings file (TOML format)
//!   -v, --verbose      Increase log verbosity (repeatable)

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::{debug, info, LevelFilter};

use axes_positioner::{
    create_shape, load_with_settings, render_svg, subplot_layout, to_source, Anchor, Edit,
    FigureLayout, FigureSize, LoadError, Settings, SubplotSpec,
};

#[derive(Parser)]
#[command(name = "axpos")]
#[command(about = "Place chart panels inside a figure canvas")]
struct Cli {
    /// Settings file (TOML format)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Increase log verbosity; overrides RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a grid of placeholder panels as a layout file
    Grid {
        #[arg(long)]
        rows: usize,
        #[arg(long)]
        cols: usize,
        /// Figure size, e.g. 12x4
        #[arg(long, value_parser = parse_figsize)]
        figsize: Option<FigureSize>,
    },

    /// Print shared-axis subplot positions for a fixed figure width
    Subplots {
        /// Figure width; the height is derived
        #[arg(long)]
        width: f64,
        #[arg(long)]
        rows: usize,
        #[arg(long)]
        cols: usize,
        /// Horizontal gap between panels
        #[arg(long, default_value_t = 0.0)]
        hpad: f64,
        /// Vertical gap between panels
        #[arg(long, default_value_t = 0.0)]
        vpad: f64,
        /// Region holding all panels, as x0,y0,x1,y1
        #[arg(long = "box", value_parser = parse_region)]
        region: Option<(f64, f64, f64, f64)>,
        /// Displayed aspect ratio of each panel
        #[arg(long, default_value_t = 1.0)]
        ax_aspect: f64,
    },

    /// Apply edits to a layout file and print the result
    ///
    /// Edits run in a fixed order: anchor, aspect lock, removals, additions,
    /// then field assignments.
    Edit {
        #[command(flatten)]
        input: InputArgs,
        /// Lock the aspect ratio of every panel
        #[arg(long)]
        lock_aspect: bool,
        /// Field assignment, e.g. A.w=0.3 or B.anchor=ur
        #[arg(long = "set", value_name = "NAME.FIELD=VALUE")]
        edits: Vec<Edit>,
        /// Add a panel around a point, as x,y
        #[arg(long = "add", value_name = "X,Y", value_parser = parse_point)]
        additions: Vec<(f64, f64)>,
        /// Remove a panel by name
        #[arg(long = "remove", value_name = "NAME")]
        removals: Vec<String>,
    },

    /// Print the anchor-relative coordinates of every panel
    Show {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print an SVG preview of a layout file
    Render {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Layout file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Anchor used for editing, e.g. center, ll, ur or 0.25,0.75
    #[arg(long)]
    anchor: Option<Anchor>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    match run(cli.command, &settings) {
        Ok(output) => print!("{}", output),
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    let level = match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn run(command: Command, settings: &Settings) -> Result<String, String> {
    match command {
        Command::Grid {
            rows,
            cols,
            figsize,
        } => {
            let figsize = figsize.or(settings.figsize).unwrap_or_default();
            let layout = create_shape(rows, cols, figsize, settings.editor.clone())
                .map_err(|e| e.to_string())?;
            Ok(to_source(&layout))
        }

        Command::Subplots {
            width,
            rows,
            cols,
            hpad,
            vpad,
            region,
            ax_aspect,
        } => {
            let mut spec = SubplotSpec::new(width, rows, cols)
                .with_padding(hpad, vpad)
                .with_ax_aspect(ax_aspect);
            if let Some((x0, y0, x1, y1)) = region {
                spec = spec.with_region(x0, y0, x1, y1);
            }
            let layout =
                subplot_layout(&spec, settings.editor.clone()).map_err(|e| e.to_string())?;
            info!("subplot figure size is {}", layout.figsize());
            Ok(to_source(&layout))
        }

        Command::Edit {
            input,
            lock_aspect,
            edits,
            additions,
            removals,
        } => {
            let mut layout = load_input(&input, settings)?;
            if lock_aspect {
                layout.lock_aspect(true);
            }
            for name in &removals {
                layout.remove(name).map_err(|e| e.to_string())?;
            }
            for (x, y) in additions {
                let name = layout.add_at(x, y).map_err(|e| e.to_string())?;
                info!("added panel {name} at ({x}, {y})");
            }
            for edit in &edits {
                layout.apply(edit).map_err(|e| e.to_string())?;
            }
            Ok(to_source(&layout))
        }

        Command::Show { input } => {
            let layout = load_input(&input, settings)?;
            Ok(format_table(&layout))
        }

        Command::Render { input } => {
            let layout = load_input(&input, settings)?;
            Ok(render_svg(&layout, &settings.svg))
        }
    }
}

/// Read, parse and re-anchor the input layout
fn load_input(input: &InputArgs, settings: &Settings) -> Result<FigureLayout, String> {
    let (source, filename) = read_source(input.file.as_deref())?;
    let mut layout = load_with_settings(&source, settings)
        .map_err(|e: LoadError| e.format(&source, &filename))?;
    if let Some(anchor) = input.anchor {
        layout.set_anchor(anchor).map_err(|e| e.to_string())?;
    }
    debug!("editing {} with anchor {}", filename, layout.anchor());
    Ok(layout)
}

fn read_source(path: Option<&Path>) -> Result<(String, String), String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map(|content| (content, path.display().to_string()))
            .map_err(|e| format!("reading file '{}': {}", path.display(), e)),
        None => {
            if io::stdin().is_terminal() {
                return Err("no input; pass a layout file or pipe one on stdin".to_string());
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("reading from stdin: {}", e))?;
            Ok((buffer, "<stdin>".to_string()))
        }
    }
}

/// One row per panel with anchor-relative `x y w h A`
fn format_table(layout: &FigureLayout) -> String {
    let width = layout.names().map(str::len).max().unwrap_or(0).max(4);
    let mut out = format!(
        "{:<width$}  {:>7}  {:>7}  {:>7}  {:>7}  {:>7}\n",
        "name", "x", "y", "w", "h", "A"
    );
    for (name, panel) in layout.iter() {
        let aspect = panel
            .aspect_ratio()
            .map_or_else(|_| "-".to_string(), |a| format!("{a:.3}"));
        out.push_str(&format!(
            "{:<width$}  {:>7.3}  {:>7.3}  {:>7.3}  {:>7.3}  {:>7}\n",
            name,
            panel.x(),
            panel.y(),
            panel.w(),
            panel.h(),
            aspect
        ));
    }
    out
}

fn parse_numbers<const N: usize>(s: &str, separator: char) -> Result<[f64; N], String> {
    let values = s
        .split(separator)
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("'{s}': {e}"))?;
    values
        .try_into()
        .map_err(|values: Vec<f64>| format!("'{s}': expected {N} numbers, got {}", values.len()))
}

fn parse_figsize(s: &str) -> Result<FigureSize, String> {
    let [width, height] = parse_numbers::<2>(&s.to_ascii_lowercase(), 'x')?;
    let figsize = FigureSize::new(width, height);
    if !figsize.is_valid() {
        return Err(format!("'{s}': figure size must be finite and positive"));
    }
    Ok(figsize)
}

fn parse_region(s: &str) -> Result<(f64, f64, f64, f64), String> {
    let [x0, y0, x1, y1] = parse_numbers::<4>(s, ',')?;
    Ok((x0, y0, x1, y1))
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let [x, y] = parse_numbers::<2>(s, ',')?;
    Ok((x, y))
}
