use std::io::{self, BufRead};

use glam::Vec3;

use crate::error::MalformedTrajectory;
use crate::Atom;

/// Lines in a frame block besides the atom lines: the count line, the comment line, and a trailing
/// separator line whose contents are ignored.
pub const BLOCK_OVERHEAD: usize = 3;

/// Number of lines a frame block with `natoms` atoms occupies.
pub const fn block_len(natoms: usize) -> usize {
    natoms + BLOCK_OVERHEAD
}

/// Read a single line into `buf`, without its line terminator.
///
/// Returns `false` once the reader is exhausted.
pub(crate) fn read_line<R: BufRead>(file: &mut R, buf: &mut String) -> io::Result<bool> {
    buf.clear();
    if file.read_line(buf)? == 0 {
        return Ok(false);
    }
    let trimmed = buf.trim_end_matches(['\n', '\r']).len();
    buf.truncate(trimmed);
    Ok(true)
}

/// Parse the atom count at the head of a frame block.
pub fn parse_count(line: &str, lineno: usize) -> Result<usize, MalformedTrajectory> {
    match line.trim().parse::<usize>() {
        Ok(natoms) if natoms > 0 => Ok(natoms),
        _ => Err(MalformedTrajectory::BadCount {
            line: lineno,
            found: line.trim().to_string(),
        }),
    }
}

/// Parse an atom line of the form `<species> <x> <y> <z>`.
pub fn parse_atom(line: &str, lineno: usize) -> Result<Atom, MalformedTrajectory> {
    let mut atom = Atom::default();
    parse_atom_into(line, lineno, &mut atom)?;
    Ok(atom)
}

/// Parse an atom line into an existing [`Atom`], reusing its species allocation.
pub(crate) fn parse_atom_into(
    line: &str,
    lineno: usize,
    atom: &mut Atom,
) -> Result<(), MalformedTrajectory> {
    let mut tokens = line.split_whitespace();
    let fields: [Option<&str>; 4] = std::array::from_fn(|_| tokens.next());
    let [Some(species), Some(x), Some(y), Some(z)] = fields else {
        let found = fields.iter().flatten().count();
        return Err(MalformedTrajectory::AtomFields { line: lineno, found });
    };
    let extra = tokens.count();
    if extra > 0 {
        return Err(MalformedTrajectory::AtomFields {
            line: lineno,
            found: 4 + extra,
        });
    }

    let coord = |token: &str| {
        token
            .parse::<f32>()
            .map_err(|_| MalformedTrajectory::BadCoordinate {
                line: lineno,
                token: token.to_string(),
            })
    };
    let position = Vec3::new(coord(x)?, coord(y)?, coord(z)?);

    atom.species.clear();
    atom.species.push_str(species);
    atom.position = position;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        assert_eq!(parse_count("3", 1), Ok(3));
        assert_eq!(parse_count("  12 \t", 1), Ok(12));
        assert_eq!(
            parse_count("abc", 7),
            Err(MalformedTrajectory::BadCount {
                line: 7,
                found: "abc".to_string()
            })
        );
        assert!(parse_count("0", 1).is_err());
        assert!(parse_count("-4", 1).is_err());
        assert!(parse_count("", 1).is_err());
        assert!(parse_count("3.0", 1).is_err());
    }

    #[test]
    fn atoms() {
        let atom = parse_atom("O 0.0 -0.5 1.25", 3).unwrap();
        assert_eq!(atom.species, "O");
        assert_eq!(atom.position, Vec3::new(0.0, -0.5, 1.25));

        let atom = parse_atom("\tH   1e-3  2.5E2 -7   ", 3).unwrap();
        assert_eq!(atom.species, "H");
        assert_eq!(atom.position, Vec3::new(0.001, 250.0, -7.0));
    }

    #[test]
    fn atom_field_count() {
        assert_eq!(
            parse_atom("O 0.0 1.0", 4),
            Err(MalformedTrajectory::AtomFields { line: 4, found: 3 })
        );
        assert_eq!(
            parse_atom("O 0.0 1.0 2.0 3.0", 4),
            Err(MalformedTrajectory::AtomFields { line: 4, found: 5 })
        );
        assert_eq!(
            parse_atom("", 4),
            Err(MalformedTrajectory::AtomFields { line: 4, found: 0 })
        );
    }

    #[test]
    fn bad_coordinate() {
        assert_eq!(
            parse_atom("H 0.0 one 2.0", 9),
            Err(MalformedTrajectory::BadCoordinate {
                line: 9,
                token: "one".to_string()
            })
        );
    }

    #[test]
    fn lines_without_terminators() -> io::Result<()> {
        let mut file = io::Cursor::new("first\r\nsecond\nlast");
        let mut buf = String::new();
        assert!(read_line(&mut file, &mut buf)?);
        assert_eq!(buf, "first");
        assert!(read_line(&mut file, &mut buf)?);
        assert_eq!(buf, "second");
        assert!(read_line(&mut file, &mut buf)?);
        assert_eq!(buf, "last");
        assert!(!read_line(&mut file, &mut buf)?);
        Ok(())
    }
}
