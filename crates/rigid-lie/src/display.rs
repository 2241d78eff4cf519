use std::fmt;

/// Writes a square matrix given as rows, one row per line and entries separated by a space.
///
/// A precision set on the formatter (`{:.3}`) is applied to every entry.
pub(crate) fn write_rows<const N: usize>(
    f: &mut fmt::Formatter<'_>,
    rows: &[[f64; N]; N],
) -> fmt::Result {
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                write!(f, " ")?;
            }
            match f.precision() {
                Some(precision) => write!(f, "{value:.precision$}")?,
                None => write!(f, "{value}")?,
            }
        }
    }
    Ok(())
}
