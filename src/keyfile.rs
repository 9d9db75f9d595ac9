//! Three-line key files: `p`, `q` and `d` as base-10 integers, one per line.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use zeroize::Zeroizing;

use crate::errors::{Error, KeyComponent, Result};

/// Longest accepted line, including the line terminator.
pub const MAX_LINE_LEN: usize = 511;

/// Raw text of one key component.
pub(crate) type KeyLine = Zeroizing<Vec<u8>>;

/// Opens `path` and reads the three key lines.
pub(crate) fn read_key_file(path: &Path) -> Result<[KeyLine; 3]> {
    let file = File::open(path).map_err(Error::FileUnavailable)?;
    read_key_lines(BufReader::new(file))
}

/// Reads the `p`, `q` and `d` lines from `reader`. Anything after the third
/// line is ignored.
pub(crate) fn read_key_lines<R: BufRead>(mut reader: R) -> Result<[KeyLine; 3]> {
    let [p, q, d] = KeyComponent::ALL;
    Ok([
        read_line(&mut reader, p)?,
        read_line(&mut reader, q)?,
        read_line(&mut reader, d)?,
    ])
}

fn read_line<R: BufRead>(reader: &mut R, component: KeyComponent) -> Result<KeyLine> {
    let mut line = Zeroizing::new(Vec::with_capacity(MAX_LINE_LEN));

    // One byte of slack tells an over-long line apart from a full one. A
    // short unterminated read can only mean end of input.
    let read = reader
        .by_ref()
        .take(MAX_LINE_LEN as u64 + 1)
        .read_until(b'\n', &mut line)
        .map_err(Error::FileUnavailable)?;
    if read == 0 {
        return Err(Error::MalformedKeyText { component });
    }

    if line.len() > MAX_LINE_LEN {
        return Err(Error::MalformedKeyText { component });
    }

    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }

    Ok(line)
}
