//! mt CLI - a multitool of small command-line utilities.
//!
//! This is the main entry point for the mt command-line application.

mod config;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use mt::paper::{parse_date, parse_labels, read_activities};
use mt::prelude::*;
use mt::songsheet::playback::{moves_for, vim_motion};
use mt::text::{clean_chat, csv, mirror_numbered, vim};

use config::Config;

/// mt - songsheets, printable paper, conversions and text helpers
#[derive(Parser)]
#[command(name = "mt")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Increase logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default ~/.multitool.json)
    #[arg(long, env = "MT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format for drawn sheets (pdf or svg)
    #[arg(long, env = "MT_FORMAT", global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// An expression to evaluate or a conversion, when no command is given
    #[arg(trailing_var_arg = true, allow_negative_numbers = true)]
    args: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a blank songsheet from an element expression, e.g. "ROW(CACTUS;LINES)"
    Songsheet {
        /// Element expression
        elements: String,

        /// Print the blank header
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        header: bool,

        /// Mirror string thicknesses for left-handed players
        #[arg(long)]
        mirror: bool,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lay out a filled songsheet from a song text file
    SongsheetFilled {
        /// Song file
        path: PathBuf,

        /// Number of columns
        #[arg(long)]
        columns: Option<usize>,

        /// Blank line height as a multiple of the lyric height
        #[arg(long)]
        spacing_ratio: Option<f64>,

        /// Sine amplitude as a multiple of the lyric height
        #[arg(long)]
        amp_ratio: Option<f64>,

        /// Leave the title out of the header
        #[arg(long)]
        no_title: bool,

        /// Mirror string thicknesses for left-handed players
        #[arg(long)]
        mirror: bool,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Wait a quarter hump and print the vim motion to the next sine character
    PlaybackStep {
        /// Song file
        file: PathBuf,
        /// Cursor column
        x: usize,
        /// Cursor line (0-based)
        y: usize,
    },

    /// Print the recording time at the cursor
    PlaybackTime {
        /// Song file
        file: PathBuf,
        /// Cursor column
        x: usize,
        /// Cursor line (0-based)
        y: usize,
    },

    /// Convert between units: AMOUNT FROM to UNIT [of MATERIAL]
    #[command(visible_aliases = ["cv", "cvt"])]
    Convert {
        #[arg(num_args = 4..=6, required = true, allow_negative_numbers = true)]
        args: Vec<String>,

        /// Decimal places in the answer
        #[arg(short, long)]
        decimals: Option<usize>,
    },

    /// Draw grid paper
    Grid {
        /// Smallest margin in inches
        #[arg(long, default_value_t = 0.4)]
        margin: f64,

        /// Cell side in inches
        #[arg(long, default_value_t = 0.2)]
        grid_side: f64,

        /// Line width in inches
        #[arg(long, default_value_t = 0.002)]
        line_width: f64,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print dated mason jar labels from "label,count;label,count"
    Masonjar {
        /// Labels and how many of each
        labels: String,

        /// Text printed on every label
        #[arg(short, long)]
        common: Option<String>,

        /// Date printed on the labels (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a tear-off daily calendar between two dates
    Ripdays {
        /// First day (YYYY-MM-DD)
        start: String,
        /// Last day (YYYY-MM-DD)
        end: String,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a habit tracker for the activities in a file
    Habits {
        /// File with one activity per line
        activities: PathBuf,

        /// First day (YYYY-MM-DD, default today)
        start: Option<String>,

        /// Wide daily-activities layout
        #[arg(long)]
        landscape: bool,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search for paint proportions that mix to a goal colour
    Colour {
        /// Goal colour as #rrggbb or an image file to average
        goal: String,

        /// Paints as name=#rrggbb
        paints: Vec<String>,

        /// Palette file used when no paints are given
        #[arg(short, long)]
        palette: Option<PathBuf>,

        /// Seconds to search for
        #[arg(short, long)]
        seconds: Option<f64>,

        /// Search a fixed number of samples instead of for a time
        #[arg(long, conflicts_with = "seconds")]
        samples: Option<usize>,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of mixes to report
        #[arg(short, long, default_value_t = 3)]
        keep: usize,

        /// Final volume of paint in millilitres (default 50)
        #[arg(long)]
        ml: Option<f64>,
    },

    /// Print a markdown table of contents for a folder of notes
    Toc {
        /// Folder to index
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Line edits for use from vim
    Vim {
        #[command(subcommand)]
        command: VimCommands,
    },

    /// CSV helpers
    Csv {
        #[command(subcommand)]
        command: CsvCommands,
    },

    /// Tidy a pasted chat log from stdin or a file
    Slack {
        /// Chat log file (default stdin)
        file: Option<PathBuf>,

        /// Names to put on their own bold line
        #[arg(short, long, value_delimiter = ',')]
        names: Vec<String>,
    },

    /// File helpers
    File {
        #[command(subcommand)]
        command: FileCommands,
    },

    /// Generate a password
    Pw {
        /// Number of characters
        length: usize,

        /// Character set: simple or adv
        #[arg(default_value = "adv")]
        charset: Charset,
    },
}

#[derive(Subcommand)]
enum VimCommands {
    /// Insert numbered debug prints after every brace until the function ends
    DebugPrints {
        /// Name printed with each debug line
        name: String,
        file: PathBuf,
        /// First line (0-based)
        line: usize,

        /// Debug print template; {name} and {n} are substituted
        #[arg(long, default_value = vim::DEFAULT_DEBUG_TEMPLATE)]
        template: String,
    },

    /// Remove debug prints until the function ends
    RemoveDebugPrints {
        file: PathBuf,
        /// First line (0-based)
        line: usize,
    },

    /// Pad lines in a range with spaces to a column
    ColumnWidth {
        file: PathBuf,
        start: usize,
        end: usize,
        col: usize,
    },

    /// Drop the first line of a range and every second one after it
    RemoveEveryOther {
        file: PathBuf,
        start: usize,
        end: usize,
    },
}

#[derive(Subcommand)]
enum CsvCommands {
    /// Keep only the last field of every line
    LastColOnly { input: PathBuf, output: PathBuf },
}

#[derive(Subcommand)]
enum FileCommands {
    /// Extend numbered files prefixN.suffix so they play forward then back
    Mirror {
        prefix: String,
        suffix: String,

        /// Folder holding the files
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.or(config.format).unwrap_or_default();

    let Some(command) = cli.command else {
        return cmd_fallback(&cli.args, config.convert.decimals);
    };

    match command {
        Commands::Songsheet {
            elements,
            header,
            mirror,
            output,
        } => {
            cmd_songsheet(&elements, &SheetOptions { header, mirror }, output, format)?;
        }
        Commands::SongsheetFilled {
            path,
            columns,
            spacing_ratio,
            amp_ratio,
            no_title,
            mirror,
            output,
        } => {
            let defaults = FilledOptions::default();
            let sheet = &config.songsheet;
            let opts = FilledOptions {
                columns: columns.or(sheet.columns).unwrap_or(defaults.columns),
                spacing_ratio: spacing_ratio
                    .or(sheet.spacing_ratio)
                    .unwrap_or(defaults.spacing_ratio),
                amp_ratio: amp_ratio.or(sheet.amp_ratio).unwrap_or(defaults.amp_ratio),
                mirror: mirror || sheet.mirror.unwrap_or(defaults.mirror),
                show_title: !no_title,
            };
            cmd_songsheet_filled(&path, &opts, output, format)?;
        }
        Commands::PlaybackStep { file, x, y } => {
            cmd_playback_step(&file, x, y)?;
        }
        Commands::PlaybackTime { file, x, y } => {
            let text = read_text(&file)?;
            let playback = Playback::new(&text, y).context("Failed to find playback times")?;
            println!("{}", playback.time_at(x));
        }
        Commands::Convert { args, decimals } => {
            let request = Request::from_args(&args)?;
            let converted = convert(&request, decimals.or(config.convert.decimals))?;
            println!("{}", converted);
        }
        Commands::Grid {
            margin,
            grid_side,
            line_width,
            output,
        } => {
            let opts = GridOptions {
                margin,
                side: grid_side,
                line_width,
            };
            let doc = grid_paper(&opts)?;
            save(&doc, output, "gridpaper", format)?;
        }
        Commands::Masonjar {
            labels,
            common,
            date,
            output,
        } => {
            let labels = parse_labels(&labels)?;
            let date = date_or_today(date.as_deref())?;
            let doc = mason_labels(common.as_deref(), &labels, date);
            save(&doc, output, "mason-labels", format)?;
        }
        Commands::Ripdays { start, end, output } => {
            let doc = rip_days(parse_date(&start)?, parse_date(&end)?)?;
            save(&doc, output, "ripdays", format)?;
        }
        Commands::Habits {
            activities,
            start,
            landscape,
            output,
        } => {
            let activities = read_activities(&activities)
                .with_context(|| format!("Failed to read {}", activities.display()))?;
            let opts = HabitOptions {
                start: date_or_today(start.as_deref())?,
                landscape,
            };
            let doc = habit_tracker(&activities, &opts);
            save(&doc, output, "habits", format)?;
        }
        Commands::Colour {
            goal,
            paints,
            palette,
            seconds,
            samples,
            seed,
            keep,
            ml,
        } => {
            let palette = palette.or_else(|| config.colour.palette.clone());
            let budget = match samples {
                Some(n) => Budget::Samples(n),
                None => Budget::Duration(Duration::from_secs_f64(
                    seconds.or(config.colour.run_seconds).unwrap_or(5.0),
                )),
            };
            let opts = SearchOptions {
                seed,
                budget,
                keep,
                ..SearchOptions::default()
            };
            let ml = ml.or(config.colour.mix_ml).unwrap_or(mt::colour::DEFAULT_MIX_ML);
            cmd_colour(&goal, &paints, palette.as_deref(), &opts, ml)?;
        }
        Commands::Toc { dir } => {
            let toc = table_of_contents(&dir)
                .with_context(|| format!("Failed to index {}", dir.display()))?;
            print!("{}", toc);
        }
        Commands::Vim { command } => {
            cmd_vim(command)?;
        }
        Commands::Csv {
            command: CsvCommands::LastColOnly { input, output },
        } => {
            let count = csv::last_column_file(&input, &output)
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            println!("Wrote {} lines to {}", count, output.display());
        }
        Commands::Slack { file, names } => {
            let text = match file {
                Some(path) => read_text(&path)?,
                None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
            };
            print!("{}", clean_chat(&text, &names)?);
        }
        Commands::File {
            command: FileCommands::Mirror { prefix, suffix, dir },
        } => {
            let written = mirror_numbered(&dir, &prefix, &suffix)
                .with_context(|| format!("Failed to mirror files in {}", dir.display()))?;
            for path in &written {
                println!("{}", path.display());
            }
            println!("Mirrored {} files", written.len());
        }
        Commands::Pw { length, charset } => {
            println!("{}", generate_password(length, charset));
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn date_or_today(date: Option<&str>) -> Result<chrono::NaiveDate> {
    match date {
        Some(text) => Ok(parse_date(text)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Write `doc` and print the files written.
fn save(doc: &Document, output: Option<PathBuf>, stem: &str, format: OutputFormat) -> Result<()> {
    let path = output.unwrap_or_else(|| format.file_name(stem));
    let written = doc
        .save(&path, format)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Evaluate the arguments as an expression, or failing that as a conversion.
fn resolve_fallback(args: &[String], decimals: Option<usize>) -> Result<String> {
    let joined = args.join(" ");
    match evaluate(&joined) {
        Ok(value) => return Ok(value.to_string()),
        Err(e) => log::debug!("not an expression: {}", e),
    }

    if (4..=6).contains(&args.len()) {
        match Request::from_args(args).and_then(|request| convert(&request, decimals)) {
            Ok(converted) => return Ok(converted.to_string()),
            Err(e) => log::debug!("not a conversion: {}", e),
        }
    }

    bail!("could not resolve command: {}", joined)
}

fn cmd_fallback(args: &[String], decimals: Option<usize>) -> Result<()> {
    if args.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }
    println!("{}", resolve_fallback(args, decimals)?);
    Ok(())
}

fn cmd_songsheet(
    elements: &str,
    opts: &SheetOptions,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let element = Element::parse(elements).context("Failed to parse songsheet elements")?;
    let doc = render_sheet(&element, opts);
    save(&doc, output, "songsheet", format)
}

fn cmd_songsheet_filled(
    path: &Path,
    opts: &FilledOptions,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let text = read_text(path)?;
    let song = Song::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    let doc = song.render(opts).context("Failed to lay out song")?;
    log::info!("{} laid out on {} pages", song.header.title, doc.page_count());
    save(&doc, output, &song.file_stem(), format)
}

fn cmd_playback_step(file: &Path, x: usize, y: usize) -> Result<()> {
    let start = Instant::now();
    let text = read_text(file)?;
    let playback = Playback::new(&text, y).context("Failed to find playback times")?;

    let (moves, wait) = moves_for(start.elapsed(), playback.quarter_hump());
    thread::sleep(wait);
    println!("{}", vim_motion(playback.step(x, moves)));
    Ok(())
}

fn cmd_colour(
    goal: &str,
    paint_args: &[String],
    palette: Option<&Path>,
    opts: &SearchOptions,
    mix_ml: f64,
) -> Result<()> {
    let goal = if goal.starts_with('#') {
        Frgb::from_hex(goal)?
    } else {
        average_colour(goal).with_context(|| format!("Failed to read goal image {}", goal))?
    };

    let paints: Vec<Paint> = if !paint_args.is_empty() {
        paint_args
            .iter()
            .map(|arg| Paint::parse(arg))
            .collect::<mt::colour::Result<_>>()?
    } else if let Some(path) = palette {
        mt::colour::load_palette(path)
            .with_context(|| format!("Failed to load palette {}", path.display()))?
    } else {
        bail!("no paints given and no palette configured");
    };

    println!("Goal colour: {}", goal);
    let inputs: Vec<Frgb> = paints.iter().map(|p| p.colour).collect();

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("mixing {} paints", paints.len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    let results = search(&inputs, &goal, opts)?;
    pb.finish_and_clear();
    log::info!("search finished in {:?}", start.elapsed());

    for (rank, result) in results.iter().enumerate() {
        println!();
        println!(
            "#{} fit {:.2}, mixes to {}",
            rank + 1,
            result.fit_8bit(),
            result.colour
        );
        for (paint, (grams, cumulative)) in paints.iter().zip(result.grams(mix_ml)) {
            println!("  {:>8.2} g {:>8.2} g  {}", grams, cumulative, paint.name);
        }
    }

    Ok(())
}

fn cmd_vim(command: VimCommands) -> Result<()> {
    match command {
        VimCommands::DebugPrints {
            name,
            file,
            line,
            template,
        } => {
            let n = vim::edit_file(&file, |lines| {
                vim::insert_debug_prints(lines, line, &name, &template)
            })
            .with_context(|| format!("Failed to edit {}", file.display()))?;
            log::info!("inserted {} debug prints", n);
        }
        VimCommands::RemoveDebugPrints { file, line } => {
            let n = vim::edit_file(&file, |lines| vim::remove_debug_prints(lines, line))
                .with_context(|| format!("Failed to edit {}", file.display()))?;
            log::info!("removed {} debug prints", n);
        }
        VimCommands::ColumnWidth {
            file,
            start,
            end,
            col,
        } => {
            vim::edit_file(&file, |lines| vim::pad_to_column(lines, start, end, col))
                .with_context(|| format!("Failed to edit {}", file.display()))?;
        }
        VimCommands::RemoveEveryOther { file, start, end } => {
            vim::edit_file(&file, |lines| vim::remove_every_other(lines, start, end))
                .with_context(|| format!("Failed to edit {}", file.display()))?;
        }
    }
    Ok(())
}
