//! Plain-text and JSON rendering of query results for the command line.

use std::io::{self, Write};

use serde::ser::{Serialize, Serializer};

use crate::data::model::{PincodeRecord, Statistics};

/// Output encoding selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Plain,
    Json,
}

/// A query result ready to print.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Value(&'a str),
    List(&'a [String]),
    Records(&'a [PincodeRecord]),
    Stats(&'a Statistics),
}

impl Serialize for Report<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Report::Value(v) => v.serialize(serializer),
            Report::List(items) => items.serialize(serializer),
            Report::Records(records) => records.serialize(serializer),
            Report::Stats(stats) => stats.serialize(serializer),
        }
    }
}

/// Verbose JSON envelope.
#[derive(serde::Serialize)]
struct Titled<'a> {
    title: &'a str,
    data: Report<'a>,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    pub format: Format,
    /// Prefix output with a title (plain) or wrap it as `{title, data}` (JSON).
    pub verbose: bool,
}

impl Printer {
    pub fn new(format: Format, verbose: bool) -> Self {
        Printer { format, verbose }
    }

    pub fn print<W: Write>(&self, out: &mut W, report: Report<'_>, title: &str) -> io::Result<()> {
        match self.format {
            Format::Json => self.print_json(out, report, title),
            Format::Plain => self.print_plain(out, report, title),
        }
    }

    fn print_json<W: Write>(&self, out: &mut W, report: Report<'_>, title: &str) -> io::Result<()> {
        if self.verbose {
            let wrapped = Titled { title, data: report };
            serde_json::to_writer_pretty(&mut *out, &wrapped)?;
        } else {
            serde_json::to_writer_pretty(&mut *out, &report)?;
        }
        writeln!(out)
    }

    fn print_plain<W: Write>(&self, out: &mut W, report: Report<'_>, title: &str) -> io::Result<()> {
        if self.verbose {
            writeln!(out, "\n{title}:")?;
            writeln!(out, "{}", "=".repeat(title.chars().count()))?;
        }

        match report {
            Report::Value(v) => writeln!(out, "{v}")?,
            Report::List([]) => writeln!(out, "No results found.")?,
            Report::List(items) => {
                for item in items {
                    writeln!(out, "{item}")?;
                }
            }
            Report::Records([]) => writeln!(out, "No results found.")?,
            Report::Records(records) => self.print_records(out, records)?,
            Report::Stats(stats) => {
                for (key, count) in stats.pairs() {
                    writeln!(out, "{}: {count}", display_key(key))?;
                }
            }
        }
        Ok(())
    }

    fn print_records<W: Write>(&self, out: &mut W, records: &[PincodeRecord]) -> io::Result<()> {
        let n = records.len();
        for (i, record) in records.iter().enumerate() {
            if self.verbose && n > 1 {
                writeln!(out, "\n{}. Record:", i + 1)?;
                writeln!(out, "{}", "-".repeat(10))?;
            }
            for (key, value) in record.pairs() {
                writeln!(out, "{}: {value}", display_key(key))?;
            }
            if !self.verbose && i + 1 < n {
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// `unique_pincodes` → `Unique Pincodes`, `Deliverystatus` → `Deliverystatus`.
pub fn display_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_word_start = true;
    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
