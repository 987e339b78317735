use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mdtools::{write_lammps_data, XyzFile};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input XYZ structure file
    #[arg(value_name = "XYZ_FILE")]
    input: PathBuf,

    /// Element labels in LAMMPS type order (defaults to order of appearance)
    #[arg(value_name = "ELEMENT")]
    specorder: Vec<String>,

    /// Output data file (defaults to the input with a .data extension)
    #[arg(short, long, value_name = "DATA_FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let xyz = XyzFile::read(&cli.input)?;
    info!(
        "{} atoms ({:?}) from {}",
        xyz.atoms().len(),
        xyz.elements(),
        cli.input.to_string_lossy()
    );

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("data"));
    let file =
        File::create(&output).context(format!("Writing {}", output.to_string_lossy()))?;
    let mut w = BufWriter::new(file);
    write_lammps_data(&mut w, &xyz, &cli.specorder)?;
    info!("wrote {}", output.to_string_lossy());
    Ok(())
}
