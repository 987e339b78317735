use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug)]
pub enum XyzParsingError {
    InvalidOrMissingAtomCount,
    InvalidAtomRow { row: usize },
    UnexpectedEndOfFile,
}

impl std::fmt::Display for XyzParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for XyzParsingError {}

#[derive(Debug, Clone)]
pub struct Atom {
    pub element: String,
    pub coords: [f64; 3],
}

/// A structure read from an XYZ file: atom count line, comment line, then
/// one `element x y z` row per atom.
#[derive(Debug)]
pub struct XyzFile {
    pub comment: String,
    atoms: Vec<Atom>,
}

impl XyzFile {
    pub fn read(path: &Path) -> Result<Self> {
        let file =
            File::open(path).context(format!("Reading {}", path.to_string_lossy()))?;
        Ok(Self::parse(BufReader::new(file))?)
    }

    pub fn parse<R: BufRead>(reader: R) -> Result<Self, XyzParsingError> {
        let mut lines = reader.lines().map_while(Result::ok);
        let count = lines
            .next()
            .and_then(|line| line.trim().parse::<usize>().ok())
            .ok_or(XyzParsingError::InvalidOrMissingAtomCount)?;
        let comment = lines.next().ok_or(XyzParsingError::UnexpectedEndOfFile)?;
        let mut atoms = Vec::with_capacity(count);
        for i in 0..count {
            let line = lines.next().ok_or(XyzParsingError::UnexpectedEndOfFile)?;
            let mut fields = line.split_whitespace();
            let atom = fields
                .next()
                .and_then(|element| {
                    let x = fields.next()?.parse().ok()?;
                    let y = fields.next()?.parse().ok()?;
                    let z = fields.next()?.parse().ok()?;
                    Some(Atom {
                        element: element.to_string(),
                        coords: [x, y, z],
                    })
                })
                .ok_or(XyzParsingError::InvalidAtomRow { row: i + 3 })?;
            atoms.push(atom);
        }
        Ok(Self { comment, atoms })
    }

    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Element labels in order of first appearance.
    #[must_use]
    pub fn elements(&self) -> Vec<&str> {
        let mut elements: Vec<&str> = Vec::new();
        for atom in &self.atoms {
            if !elements.contains(&atom.element.as_str()) {
                elements.push(&atom.element);
            }
        }
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_f64_near;
    use std::io::Cursor;

    const QUARTZ: &str = "3\n\
        quartz fragment\n\
        Si 0.0 0.0 0.0\n\
        O 1.6 0.0 0.0\n\
        O 0.0 1.6 0.0\n";

    #[test]
    fn test_parse() {
        let xyz = XyzFile::parse(Cursor::new(QUARTZ)).unwrap();
        assert_eq!(xyz.comment, "quartz fragment");
        assert_eq!(xyz.atoms().len(), 3);
        assert_eq!(xyz.atoms()[1].element, "O");
        assert_f64_near!(xyz.atoms()[1].coords[0], 1.6);
        assert_eq!(xyz.elements(), ["Si", "O"]);
    }

    #[test]
    fn test_missing_atom_count() {
        let err = XyzFile::parse(Cursor::new("not a number\n")).unwrap_err();
        assert!(matches!(err, XyzParsingError::InvalidOrMissingAtomCount));
    }

    #[test]
    fn test_truncated_file() {
        let err = XyzFile::parse(Cursor::new("2\ncomment\nSi 0 0 0\n")).unwrap_err();
        assert!(matches!(err, XyzParsingError::UnexpectedEndOfFile));
    }

    #[test]
    fn test_malformed_row() {
        let err = XyzFile::parse(Cursor::new("1\ncomment\nSi 0 zero 0\n")).unwrap_err();
        assert!(matches!(err, XyzParsingError::InvalidAtomRow { row: 3 }));
    }
}
