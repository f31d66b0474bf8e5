//! Plain-text persistence.
//!
//! The format is line oriented:
//!
//! ```text
//! 2 3
//! 1 2 3
//! 4 5 6
//! ```
//!
//! The first line holds the extents, one per dimension. Every following
//! whitespace-separated token is an element in row-major order; line breaks
//! after the first line are not significant. [`Matrix::write_to`] emits one
//! line per index of the leading dimensions.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::matrix::Matrix;
use crate::{MatrixError, Result};

fn format_err(line: usize, message: impl Into<String>) -> MatrixError {
    let message = message.into();
    log::warn!("rejecting matrix text at line {}: {}", line, message);
    MatrixError::Format { line, message }
}

impl<T, const N: usize> Matrix<T, N>
where
    T: FromStr,
    T::Err: Display,
{
    /// Parse an array from `reader`.
    ///
    /// # Errors
    /// [`MatrixError::Format`] when the extent line does not hold exactly `N`
    /// integers, a token does not parse, or the number of values differs from
    /// the product of the extents. [`MatrixError::Io`] on read failures.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(format_err(1, "missing extent line")),
        };
        let tokens: Vec<&str> = header.split_whitespace().collect();
        if tokens.len() != N {
            return Err(format_err(
                1,
                format!("expected {} extents, found {}", N, tokens.len()),
            ));
        }
        let mut extents = [0usize; N];
        for (e, tok) in extents.iter_mut().zip(&tokens) {
            *e = tok
                .parse()
                .map_err(|_| format_err(1, format!("invalid extent {tok:?}")))?;
        }

        let expected = extents
            .iter()
            .try_fold(1usize, |acc, &e| acc.checked_mul(e))
            .ok_or_else(|| format_err(1, format!("extents {extents:?} overflow usize")))?;
        // capacity follows the values actually read, not the header
        let mut elems = Vec::new();
        let mut last_line = 1;
        for (k, line) in lines.enumerate() {
            let line = line?;
            last_line = k + 2;
            for tok in line.split_whitespace() {
                if elems.len() == expected {
                    return Err(format_err(
                        last_line,
                        format!("more than {expected} values"),
                    ));
                }
                let value = tok
                    .parse::<T>()
                    .map_err(|e| format_err(last_line, format!("invalid value {tok:?}: {e}")))?;
                elems.push(value);
            }
        }
        if elems.len() != expected {
            return Err(format_err(
                last_line,
                format!("expected {} values, found {}", expected, elems.len()),
            ));
        }

        log::debug!("read matrix: extents={:?} values={}", extents, elems.len());
        Matrix::from_vec(extents, elems)
    }

    /// Read an array from the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading matrix from {}", path.display());
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}

impl<T: Display, const N: usize> Matrix<T, N> {
    /// Write the array in the format [`Matrix::read_from`] accepts.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let header: Vec<String> = self.extents().iter().map(|e| e.to_string()).collect();
        writeln!(writer, "{}", header.join(" "))?;

        let row_len = self.extents().last().copied().unwrap_or(1);
        if row_len > 0 {
            for row in self.data().chunks(row_len) {
                let line: Vec<String> = row.iter().map(|x| x.to_string()).collect();
                writeln!(writer, "{}", line.join(" "))?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the array to the file at `path`, replacing it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        log::debug!(
            "saving matrix to {}: extents={:?}",
            path.display(),
            self.extents()
        );
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}
