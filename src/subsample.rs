use itertools::Itertools;
use std::io::{self, Write};

/// Stride that brings `n` rows down to roughly `target` rows. A `target` of
/// zero keeps every row.
#[must_use]
pub fn stride_for(n: usize, target: usize) -> usize {
    if target == 0 {
        1
    } else {
        1.max(n / target)
    }
}

/// Write every stride-th row of the given columns as space-delimited text,
/// stopping at the shortest column.
pub fn write_columns<W: Write>(w: &mut W, columns: &[&[f64]], stride: usize) -> io::Result<()> {
    let n = columns.iter().map(|column| column.len()).min().unwrap_or(0);
    for i in (0..n).step_by(stride.max(1)) {
        let row = columns.iter().map(|column| format!("{:.12e}", column[i])).join(" ");
        writeln!(w, "{row}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_for() {
        assert_eq!(stride_for(100, 10), 10);
        assert_eq!(stride_for(10, 3), 3);
        assert_eq!(stride_for(10, 0), 1);
        assert_eq!(stride_for(5, 100), 1);
        assert_eq!(stride_for(0, 10), 1);
    }

    fn written_rows(columns: &[&[f64]], stride: usize) -> Vec<String> {
        let mut buf = Vec::new();
        write_columns(&mut buf, columns, stride).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_write_columns_stride() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..10).map(|i| (i * i) as f64).collect();
        let rows = written_rows(&[&x, &y], stride_for(x.len(), 3));
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], "3.000000000000e0 9.000000000000e0");
    }

    #[test]
    fn test_write_columns_stops_at_shortest() {
        let x = [0.0, 1.0, 2.0];
        let y = [5.0, 6.0];
        let rows = written_rows(&[&x, &y], 1);
        assert_eq!(rows.len(), 2);
    }
}
