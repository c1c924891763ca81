//! Text dump of a CFF
//!
//! ```text
//! 2-CFF(7,7):
//! 1 1 1 - - - -
//! 1 - - 1 1 - -
//! ...
//! ```
//!
//! A header line `<d>-CFF(<t>,<n>):` followed by `t` lines of `n` tokens
//! separated by single spaces, `1` for a set cell and `-` for a clear one.
//! Every line ends with `\n`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use cfftables_core::constants::{CELL_SEPARATOR, CLEAR_TOKEN, HEADER_TERMINATOR, SET_TOKEN};
use cfftables_core::{parse_cell, parse_header, BitMatrix};
use log::info;

use crate::cff::Cff;
use crate::construct::MAX_ENGINE_CELLS;
use crate::error::{Error, Result};

impl Cff {
    /// Write the text dump to `sink`, flushing before returning
    pub fn write<W: Write>(&self, sink: W) -> Result<()> {
        let mut out = BufWriter::new(sink);
        writeln!(out, "{}{}", self.header(), HEADER_TERMINATOR)?;

        let matrix = self.matrix();
        let mut line = String::with_capacity(2 * self.n());
        for r in 0..self.t() {
            line.clear();
            for c in 0..self.n() {
                if c > 0 {
                    line.push_str(CELL_SEPARATOR);
                }
                line.push_str(if matrix.bit(r, c) { SET_TOKEN } else { CLEAR_TOKEN });
            }
            writeln!(out, "{line}")?;
        }

        out.flush()?;
        Ok(())
    }

    /// Write the text dump to a new file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        {
            let file = File::create(path)?;
            self.write(file)?;
        }
        info!("saved {} to {}", self, path.display());
        Ok(())
    }

    /// Parse a text dump
    pub fn read<R: BufRead>(source: R) -> Result<Self> {
        let mut lines = source.lines();

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break parse_header(&line)?;
                    }
                }
                None => return Err(Error::Parse("missing header".into())),
            }
        };

        match header.cells() {
            Some(cells) if cells <= MAX_ENGINE_CELLS => {}
            _ => return Err(Error::Parse(format!("{header} is too large to load"))),
        }
        let mut matrix = BitMatrix::new(header.t, header.n)?;
        for r in 0..header.t {
            let line = lines
                .next()
                .ok_or_else(|| Error::Parse(format!("expected {} rows, found {r}", header.t)))??;
            let mut cells = 0;
            for (c, token) in line.split_whitespace().enumerate() {
                if c >= header.n {
                    return Err(Error::Parse(format!("row {r} has more than {} cells", header.n)));
                }
                if parse_cell(token)? {
                    matrix.set_bit(r, c, true);
                }
                cells += 1;
            }
            if cells != header.n {
                return Err(Error::Parse(format!(
                    "row {r} has {cells} cells, expected {}",
                    header.n
                )));
            }
        }

        for line in lines {
            if !line?.trim().is_empty() {
                return Err(Error::Parse(format!("trailing data after {header}")));
            }
        }

        Self::from_parts(header.d, matrix)
    }

    /// Parse the text dump stored at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }
}
