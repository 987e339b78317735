use anyhow::{anyhow, Result};
use std::io::Write;

use crate::xyz::XyzFile;

// Keeps every atom strictly inside the orthogonal box.
const BOX_SKIN: f64 = 0.5;

/// Write a structure as a LAMMPS data file (atomic style). `specorder`
/// lists element labels in type order; when empty, types follow the order
/// of first appearance in the structure.
pub fn write_lammps_data<W: Write>(
    w: &mut W,
    xyz: &XyzFile,
    specorder: &[String],
) -> Result<()> {
    if xyz.atoms().is_empty() {
        return Err(anyhow!("no atoms to write"));
    }
    let types: Vec<&str> = if specorder.is_empty() {
        xyz.elements()
    } else {
        specorder.iter().map(String::as_str).collect()
    };
    let type_of = |element: &str| {
        types
            .iter()
            .position(|&t| t == element)
            .map(|i| i + 1)
            .ok_or_else(|| anyhow!("element {element} is not in the element order {types:?}"))
    };

    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for atom in xyz.atoms() {
        for (k, &c) in atom.coords.iter().enumerate() {
            lo[k] = lo[k].min(c);
            hi[k] = hi[k].max(c);
        }
    }

    writeln!(w, "# {}", xyz.comment.trim())?;
    writeln!(w)?;
    writeln!(w, "{} atoms", xyz.atoms().len())?;
    writeln!(w, "{} atom types", types.len())?;
    writeln!(w)?;
    for (k, axis) in ["x", "y", "z"].into_iter().enumerate() {
        writeln!(
            w,
            "{:.6} {:.6} {axis}lo {axis}hi",
            lo[k] - BOX_SKIN,
            hi[k] + BOX_SKIN
        )?;
    }
    writeln!(w)?;
    writeln!(w, "Atoms # atomic")?;
    writeln!(w)?;
    for (i, atom) in xyz.atoms().iter().enumerate() {
        writeln!(
            w,
            "{} {} {:.6} {:.6} {:.6}",
            i + 1,
            type_of(&atom.element)?,
            atom.coords[0],
            atom.coords[1],
            atom.coords[2]
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quartz() -> XyzFile {
        let text = "3\n\
            quartz fragment\n\
            Si 0.0 0.0 0.0\n\
            O 1.6 0.0 0.0\n\
            O 0.0 1.6 0.0\n";
        XyzFile::parse(Cursor::new(text)).unwrap()
    }

    fn written(xyz: &XyzFile, specorder: &[String]) -> String {
        let mut buf = Vec::new();
        write_lammps_data(&mut buf, xyz, specorder).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_specorder_types() {
        let out = written(&quartz(), &["O".to_string(), "Si".to_string()]);
        assert!(out.contains("3 atoms"));
        assert!(out.contains("2 atom types"));
        assert!(out.contains("1 2 0.000000 0.000000 0.000000"));
        assert!(out.contains("2 1 1.600000 0.000000 0.000000"));
    }

    #[test]
    fn test_derived_element_order() {
        let out = written(&quartz(), &[]);
        assert!(out.contains("1 1 0.000000 0.000000 0.000000"));
        assert!(out.contains("3 2 0.000000 1.600000 0.000000"));
    }

    #[test]
    fn test_box_bounds() {
        let out = written(&quartz(), &[]);
        assert!(out.contains("-0.500000 2.100000 xlo xhi"));
        assert!(out.contains("-0.500000 0.500000 zlo zhi"));
    }

    #[test]
    fn test_unknown_element() {
        let mut buf = Vec::new();
        let err = write_lammps_data(&mut buf, &quartz(), &["C".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Si"));
    }
}
