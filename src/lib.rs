mod data_file;
mod log_table;
mod math;
mod smooth;
mod subsample;
mod xyz;

pub use data_file::write_lammps_data;
pub use log_table::{LogParsingError, LogTable, Markers, MARKER_END, MARKER_START};
pub use math::IteratorAvg;
pub use smooth::smooth;
pub use subsample::{stride_for, write_columns};
pub use xyz::{Atom, XyzFile, XyzParsingError};
