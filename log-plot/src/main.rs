use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use mdtools::{smooth, stride_for, write_columns, LogTable, Markers, MARKER_END, MARKER_START};
use plotters::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::iter;
use std::path::{Path, PathBuf};

const PLOT_WIDTH: u32 = 960;
const SUBPLOT_HEIGHT: u32 = 320;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input log files
    #[arg(short, long, value_name = "LOG_FILE", required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Column to put on the x axis
    #[arg(short, long, default_value = "Step", value_name = "COLUMN")]
    x: String,

    /// Columns to plot against the x axis, one subplot each
    #[arg(short, long, default_value = "Temp", value_name = "COLUMN", num_args = 1..)]
    y: Vec<String>,

    /// Label for the x axis (defaults to the column name)
    #[arg(long)]
    xlabel: Option<String>,

    /// Label for the y axis (defaults to the column name)
    #[arg(long)]
    ylabel: Option<String>,

    /// Where to save the rendered plot
    #[arg(short, long, value_name = "PLOT_FILE", default_value = "log_plot.png")]
    save: PathBuf,

    /// Moving average half-width (0 disables smoothing)
    #[arg(long, default_value_t = 0, value_name = "HALF_WIDTH")]
    smooth: usize,

    /// Write the selected columns to a delimited text file
    #[arg(long, value_name = "DATA_FILE")]
    dump: Option<PathBuf>,

    /// Approximate number of rows in the dump file (0 keeps every row)
    #[arg(long, default_value_t = 0, value_name = "NUM_ROWS")]
    dumpnum: usize,

    /// Skip chart rendering
    #[arg(long)]
    no_plot: bool,

    /// Substring that starts a data block
    #[arg(long, default_value = MARKER_START)]
    start_marker: String,

    /// Substring that ends a data block
    #[arg(long, default_value = MARKER_END)]
    end_marker: String,
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo < hi {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn plot_series(
    path: &Path,
    x: &[f64],
    series: &[(String, Vec<f64>)],
    xlabel: &str,
    ylabel: Option<&str>,
) -> Result<()> {
    let height = SUBPLOT_HEIGHT * series.len() as u32;
    let root = BitMapBackend::new(path, (PLOT_WIDTH, height)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((series.len(), 1));
    let (x_lo, x_hi) = bounds(x);
    for (i, ((key, y), area)) in iter::zip(series, &areas).enumerate() {
        let (y_lo, y_hi) = bounds(y);
        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
        let y_desc = match (ylabel, series.len()) {
            (Some(label), 1) => label,
            _ => key.as_str(),
        };
        chart
            .configure_mesh()
            .x_desc(xlabel)
            .y_desc(y_desc)
            .label_style(("sans-serif", 16))
            .draw()?;
        chart.draw_series(LineSeries::new(
            iter::zip(x, y).map(|(&x, &y)| (x, y)),
            &Palette99::pick(i),
        ))?;
    }
    root.present()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let markers = Markers::new(&cli.start_marker, &cli.end_marker);

    let mut table = LogTable::default();
    for path in &cli.input {
        info!("reading {}", path.to_string_lossy());
        table.merge(LogTable::read(path, &markers)?);
    }

    let x = table
        .get(&cli.x)
        .ok_or_else(|| anyhow!("no column {} in the input logs", cli.x))?;
    let mut series = Vec::new();
    for key in &cli.y {
        let y = table
            .get(key)
            .ok_or_else(|| anyhow!("no column {key} in the input logs"))?;
        series.push((key.clone(), y.to_vec()));
    }

    let len = series
        .iter()
        .map(|(_, y)| y.len())
        .chain([x.len()])
        .min()
        .unwrap_or(0);
    if len == 0 {
        return Err(anyhow!("no data rows extracted from the input logs"));
    }
    info!("{len} rows across {} file(s)", cli.input.len());
    let x = x[..len].to_vec();
    for (_, y) in &mut series {
        y.truncate(len);
    }
    if cli.smooth > 0 {
        for (_, y) in &mut series {
            *y = smooth(y, cli.smooth);
        }
    }

    if !cli.no_plot {
        let xlabel = cli.xlabel.as_deref().unwrap_or(&cli.x);
        plot_series(&cli.save, &x, &series, xlabel, cli.ylabel.as_deref())?;
        info!("saved plot to {}", cli.save.to_string_lossy());
    }

    if let Some(dump_path) = &cli.dump {
        let mut columns: Vec<&[f64]> = vec![&x];
        columns.extend(series.iter().map(|(_, y)| y.as_slice()));
        let file = File::create(dump_path)
            .context(format!("Writing {}", dump_path.to_string_lossy()))?;
        let mut w = BufWriter::new(file);
        write_columns(&mut w, &columns, stride_for(len, cli.dumpnum))?;
        info!("dumped table to {}", dump_path.to_string_lossy());
    }
    Ok(())
}
