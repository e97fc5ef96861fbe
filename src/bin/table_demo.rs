//! Interactive demo: a large table that builds in the background while the
//! terminal stays responsive.
//!
//! Hover and click cells, click the index column or headers to toggle rows and
//! columns, click the top-left corner to select everything. Wheel scrolls
//! (Shift or Alt for horizontal). `q`, Esc, or Ctrl+C quits and prints the
//! selected `(row, column)` pairs.
//!
//! Logs go to stderr; set `RUST_LOG=canvas_table=debug` and redirect stderr
//! to follow build passes.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::EventStream;
use futures::StreamExt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use canvas_table::event::{InputEvent, Key};
use canvas_table::geometry::Region;
use canvas_table::render::{Compositor, Driver};
use canvas_table::table::{CellValue, CsvSource, SizingPolicy, TableOptions, TableView};
use canvas_table::widget::Widget;
use canvas_table::Theme;

const FRAME: Duration = Duration::from_millis(16);

/// Progressive table view demo
#[derive(Parser, Debug)]
#[command(name = "table_demo", version, about = "Progressive table view demo")]
struct Args {
    /// CSV file with a header row; a generated table is shown when omitted
    #[arg(value_name = "CSV")]
    csv: Option<PathBuf>,

    /// Rows to generate when no CSV is given
    #[arg(long, default_value_t = 10_000)]
    rows: usize,

    /// Data columns to generate when no CSV is given
    #[arg(long, default_value_t = 8)]
    columns: usize,

    /// Palette: dark or light
    #[arg(long, default_value = "dark")]
    theme: String,

    /// Size columns and rows to their content
    #[arg(long)]
    autofit: bool,

    /// Fixed width for every data column
    #[arg(long, value_name = "N")]
    column_width: Option<usize>,

    /// Clip labels to N characters
    #[arg(long, value_name = "N")]
    truncate: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start runtime")?;
    let selected = runtime.block_on(run(args))?;

    println!("selected: {selected:?}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn options(args: &Args) -> Result<TableOptions> {
    let theme = Theme::from_name(&args.theme)?;
    let mut sizing = SizingPolicy::new().with_autofit(args.autofit);
    if let Some(width) = args.column_width {
        sizing = sizing.with_column_width(width);
    }
    if let Some(limit) = args.truncate {
        sizing = sizing.with_truncate(limit);
    }
    Ok(TableOptions::new().with_sizing(sizing).with_theme(theme))
}

fn generated(rows: usize, columns: usize, options: TableOptions) -> Result<TableView> {
    let headers = (1..=columns).map(|c| format!("Column {c}")).collect();
    let data = (0..rows)
        .map(|r| {
            (0..columns)
                .map(|c| match c % 3 {
                    0 => CellValue::from(format!("row {r} col {c}")),
                    1 => CellValue::from(r * columns + c),
                    _ => CellValue::from(r as f64 / 4.0),
                })
                .collect()
        })
        .collect();
    Ok(TableView::new(headers, data, options)?)
}

async fn run(args: Args) -> Result<BTreeSet<(usize, usize)>> {
    let options = options(&args)?;
    let mut view = match &args.csv {
        Some(path) => TableView::from_source(&CsvSource::from_path(path), options)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => generated(args.rows, args.columns, options)?,
    };

    let (width, height) = Driver::terminal_size()?;
    view.set_area(Region::new(0, 0, i32::from(width), i32::from(height)));

    let mut driver = Driver::new()?;
    driver.enter()?;
    let outcome = event_loop(&mut view, &mut driver, width, height).await;
    driver.leave()?;
    outcome?;

    debug!(selected = view.selection().len(), "demo finished");
    Ok(view.selected_indices())
}

async fn event_loop(view: &mut TableView, driver: &mut Driver, width: u16, height: u16) -> Result<()> {
    let mut events = EventStream::new();
    let mut frame = tokio::time::interval(FRAME);
    let mut current = Compositor::new(width, height);
    let mut previous = Compositor::new(0, 0);
    let mut dirty = true;

    loop {
        if dirty {
            draw(view, driver, &mut current, &mut previous)?;
            dirty = false;
        }

        let building = view.is_building();
        tokio::select! {
            biased;
            maybe = events.next() => {
                let Some(event) = maybe else {
                    return Ok(());
                };
                let Some(input) = InputEvent::from_crossterm(event?) else {
                    continue;
                };
                match input {
                    InputEvent::Key(key)
                        if key.is_interrupt() || matches!(key.code, Key::Escape | Key::Char('q')) =>
                    {
                        return Ok(());
                    }
                    InputEvent::Resize { width, height } => {
                        current.resize(width, height);
                        previous = Compositor::new(0, 0);
                        view.set_area(current.area());
                        dirty = true;
                    }
                    other => dirty |= view.handle_input(&other),
                }
            }
            _ = frame.tick() => dirty |= building,
            _ = view.drive(), if building => dirty = true,
        }
    }
}

fn draw(
    view: &TableView,
    driver: &mut Driver,
    current: &mut Compositor,
    previous: &mut Compositor,
) -> io::Result<()> {
    let theme = view.theme();
    let area = current.area();
    current.fill(theme.style_on(&theme.background));
    current.place_strips(&view.render(area, theme), area);
    driver.apply_updates(&current.diff(previous))?;
    driver.flush()?;
    *previous = current.clone();
    Ok(())
}
