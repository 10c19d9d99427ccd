//! Input parsers for the m5 and pre alignment formats.
//!
//! Both formats carry one alignment per line, fields separated by spaces.
//! The format is selected explicitly per parser instance; there is no content
//! sniffing.

pub mod m5;
pub mod pre;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use flate2::read::GzDecoder;
use thiserror::Error;

use crate::types::{Alignment, GroupBy, Strand};

/// Which textual alignment format a line is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlnFormat {
    M5,
    Pre,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing {field} (column {column})")]
    MissingField { field: &'static str, column: usize },
    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid strand: {0:?}")]
    InvalidStrand(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a single line into an [`Alignment`].
///
/// Blank lines (zero fields after tokenization) produce `Ok(None)`. A missing
/// column, a non-numeric value in a numeric column, or an unrecognized strand
/// character is a hard error.
pub fn parse_line(
    line: &str,
    format: AlnFormat,
    group_by: GroupBy,
) -> Result<Option<Alignment>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }
    let aln = match format {
        AlnFormat::M5 => m5::parse(&fields, group_by)?,
        AlnFormat::Pre => pre::parse(&fields)?,
    };
    Ok(Some(aln))
}

fn field<'a>(
    fields: &[&'a str],
    column: usize,
    name: &'static str,
) -> Result<&'a str, ParseError> {
    fields.get(column).copied().ok_or(ParseError::MissingField {
        field: name,
        column,
    })
}

fn numeric<T: FromStr>(
    fields: &[&str],
    column: usize,
    name: &'static str,
) -> Result<T, ParseError> {
    let raw = field(fields, column, name)?;
    raw.parse().map_err(|_| ParseError::InvalidNumber {
        field: name,
        value: raw.to_string(),
    })
}

fn strand(fields: &[&str], column: usize) -> Result<Strand, ParseError> {
    let raw = field(fields, column, "strand")?;
    match raw.chars().next() {
        Some('+') => Ok(Strand::Forward),
        Some('-') => Ok(Strand::Reverse),
        _ => Err(ParseError::InvalidStrand(raw.to_string())),
    }
}

/// Parse a whole file and return all alignment records.
pub fn parse_file<P: AsRef<Path>>(
    path: P,
    format: AlnFormat,
    group_by: GroupBy,
) -> Result<Vec<Alignment>> {
    let file = File::open(&path)?;
    let path_str = path.as_ref().to_string_lossy();

    if path_str.ends_with(".gz") {
        let decoder = GzDecoder::new(file);
        parse_reader(BufReader::new(decoder), format, group_by)
    } else {
        parse_reader(BufReader::new(file), format, group_by)
    }
}

/// Parse alignment data from any BufRead source.
pub fn parse_reader<R: BufRead>(
    reader: R,
    format: AlnFormat,
    group_by: GroupBy,
) -> Result<Vec<Alignment>> {
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line, format, group_by) {
            Ok(Some(aln)) => records.push(aln),
            Ok(None) => continue,
            Err(e) => return Err(anyhow!("Error parsing line {}: {}", line_num + 1, e)),
        }
    }

    Ok(records)
}

/// Streaming iterator over alignment records; reads one line per `next` call.
pub struct AlnReader<R: BufRead> {
    reader: R,
    format: AlnFormat,
    group_by: GroupBy,
    line_buffer: String,
    line_number: usize,
}

impl<R: BufRead> AlnReader<R> {
    pub fn new(reader: R, format: AlnFormat, group_by: GroupBy) -> Self {
        Self {
            reader,
            format,
            group_by,
            line_buffer: String::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for AlnReader<R> {
    type Item = Result<Alignment>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();

            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    self.line_number += 1;

                    match parse_line(&self.line_buffer, self.format, self.group_by) {
                        Ok(Some(aln)) => return Some(Ok(aln)),
                        Ok(None) => continue,
                        Err(e) => {
                            return Some(Err(anyhow!(
                                "Error parsing line {}: {}",
                                self.line_number,
                                e
                            )))
                        }
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
