/*!
Reader for address trace files.

A trace contains one decimal virtual address per line. Blank lines are
ignored, surrounding whitespace is trimmed.
*/

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::IntErrorKind;
use std::path::Path;

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::types::{umem, Address};

/// Iterator over the addresses of a trace.
///
/// Addresses are validated against the size of the address space. The iterator
/// yields an error for the first malformed line and stops afterwards.
///
/// # Examples
///
/// ```
/// use vmsim::trace::TraceReader;
/// use vmsim::types::Address;
///
/// let trace = "1\n256\n\n  65535 \n";
/// let addrs = TraceReader::new(trace.as_bytes(), 65536)
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(addrs, vec![Address::from(1u64), Address::from(256u64), Address::from(65535u64)]);
/// ```
pub struct TraceReader<R> {
    reader: R,
    address_space_size: umem,
    line: String,
    line_no: usize,
    failed: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, address_space_size: umem) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            Error(ErrorOrigin::Trace, ErrorKind::UnableToOpenFile)
                .log_error(format!("{}: {}", path.display(), err))
        })?;
        Ok(Self::new(BufReader::new(file), address_space_size))
    }
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R, address_space_size: umem) -> Self {
        Self {
            reader,
            address_space_size,
            line: String::new(),
            line_no: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    fn parse_line(&self, line: &str) -> Result<Address> {
        let value = line.parse::<i128>().map_err(|err| {
            // a well formed number that does not even fit into an i128
            let kind = match err.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ErrorKind::OutOfRange,
                _ => ErrorKind::Encoding,
            };
            Error(ErrorOrigin::Trace, kind)
                .log_error(format!("line {}: '{}' is not an address ({})", self.line_no, line, err))
        })?;

        if value < 0 || value >= self.address_space_size as i128 {
            return Err(Error(ErrorOrigin::Trace, ErrorKind::OutOfRange).log_error(format!(
                "line {}: address {} is outside of the address space [0, {})",
                self.line_no, value, self.address_space_size
            )));
        }

        Ok(Address::from(value as umem))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Address>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let result = self.parse_line(line);
                    self.failed = result.is_err();
                    return Some(result);
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(Error(ErrorOrigin::Trace, ErrorKind::UnableToReadFile)
                        .log_error(format!("line {}: {}", self.line_no + 1, err))));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(trace: &str) -> Vec<Result<Address>> {
        TraceReader::new(trace.as_bytes(), 65536).collect()
    }

    #[test]
    fn parse_addresses() {
        let addrs = read("0\n0\r\n256\n")
            .into_iter()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(addrs, vec![Address::from(0u64), Address::from(0u64), Address::from(256u64)]);
    }

    #[test]
    fn empty_trace() {
        assert!(read("").is_empty());
        assert!(read("\n\n  \n").is_empty());
    }

    #[test]
    fn out_of_range() {
        let res = read("1\n70000\n2\n");
        assert_eq!(res.len(), 2);
        assert_eq!(
            res[1],
            Err(Error(ErrorOrigin::Trace, ErrorKind::OutOfRange))
        );

        let res = read("65536\n");
        assert_eq!(
            res[0],
            Err(Error(ErrorOrigin::Trace, ErrorKind::OutOfRange))
        );

        let res = read("-1\n");
        assert_eq!(
            res[0],
            Err(Error(ErrorOrigin::Trace, ErrorKind::OutOfRange))
        );

        let huge = format!("{}\n", "9".repeat(60));
        assert_eq!(
            read(&huge)[0],
            Err(Error(ErrorOrigin::Trace, ErrorKind::OutOfRange))
        );
        let res = read(&format!("-{}", huge));
        assert_eq!(
            res[0],
            Err(Error(ErrorOrigin::Trace, ErrorKind::OutOfRange))
        );
    }

    #[test]
    fn malformed_line() {
        let mut reader = TraceReader::new("12\n\nabc\n13\n".as_bytes(), 65536);
        assert_eq!(reader.next(), Some(Ok(Address::from(12u64))));
        assert_eq!(
            reader.next(),
            Some(Err(Error(ErrorOrigin::Trace, ErrorKind::Encoding)))
        );
        assert_eq!(reader.line_no(), 3);
        assert_eq!(reader.next(), None);
    }

    #[test]
    fn missing_file() {
        assert_eq!(
            TraceReader::open("/nonexistent/addresses.txt", 65536)
                .err()
                .unwrap(),
            Error(ErrorOrigin::Trace, ErrorKind::UnableToOpenFile)
        );
    }
}
