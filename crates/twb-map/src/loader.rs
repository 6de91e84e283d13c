//! Mapping source parsing.

use std::io::{self, Read};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;
use twb_model::{MappingRule, MappingSet};

use crate::error::MappingError;

/// How rows that cannot form a rule are treated.
///
/// Validation uses [`RowPolicy::Strict`] and stops at the first bad row,
/// blank lines included. Remapping uses [`RowPolicy::Lenient`] and skips bad
/// rows. The two entry points intentionally disagree; both still reject a
/// source with no rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    #[default]
    Strict,
    Lenient,
}

/// Load a mapping set from headerless CSV.
///
/// Only the first two columns of each row are used; extra columns are
/// ignored. A blank line is a row with no columns. Rows are numbered by the
/// physical 1-based line they start on.
pub fn load_mapping_set<R: Read>(reader: R, policy: RowPolicy) -> Result<MappingSet, MappingError> {
    let text = io::read_to_string(reader).map_err(csv::Error::from)?;
    parse_mapping_set(&text, policy)
}

/// Load a mapping set from an in-memory CSV string.
pub fn parse_mapping_set(text: &str, policy: RowPolicy) -> Result<MappingSet, MappingError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut cursor = LineCursor::new(text);
    let mut record = StringRecord::new();
    let mut rules = MappingSet::new();

    let mut accept = |row: Result<MappingRule, MappingError>| match row {
        Ok(rule) => {
            rules.push(rule);
            Ok(())
        }
        Err(error) if policy == RowPolicy::Lenient => {
            debug!(line = error.line(), %error, "skipping mapping row");
            Ok(())
        }
        Err(error) => Err(error),
    };

    while reader.read_record(&mut record)? {
        for line in cursor.skip_blank_lines() {
            accept(Err(MappingError::MalformedRow { line, columns: 0 }))?;
        }
        let line = cursor.line();
        accept(rule_from_record(&record, line))?;
        cursor.advance_past_record(reader.position().byte());
    }
    for line in cursor.skip_blank_lines() {
        accept(Err(MappingError::MalformedRow { line, columns: 0 }))?;
    }

    if rules.is_empty() {
        return Err(MappingError::Empty);
    }
    debug!(rules = rules.len(), ?policy, "loaded mapping set");
    Ok(rules)
}

/// Physical line tracking over the text the csv reader consumes.
///
/// The csv reader drops blank lines without reporting them, so they are
/// recovered from the gaps between the byte ranges of consecutive records.
/// Lines end at `\n`; a preceding `\r` belongs to the same terminator.
struct LineCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line(&self) -> u64 {
        self.line
    }

    /// Consume the blank lines at the cursor and return their numbers.
    fn skip_blank_lines(&mut self) -> Vec<u64> {
        let mut blank = Vec::new();
        while let Some(&byte) = self.bytes.get(self.offset) {
            match byte {
                b'\n' => {
                    blank.push(self.line);
                    self.line += 1;
                }
                b'\r' => {}
                _ => break,
            }
            self.offset += 1;
        }
        blank
    }

    /// Move to `end`, the reader position just after a record.
    fn advance_past_record(&mut self, end: u64) {
        let end = usize::try_from(end)
            .unwrap_or(self.bytes.len())
            .clamp(self.offset, self.bytes.len());
        let breaks = self.bytes[self.offset..end]
            .iter()
            .filter(|&&byte| byte == b'\n')
            .count();
        self.line += breaks as u64;
        self.offset = end;
        // the reader may stop between the two bytes of a CRLF terminator
        if self.offset > 0
            && self.bytes[self.offset - 1] == b'\r'
            && self.bytes.get(self.offset) == Some(&b'\n')
        {
            self.offset += 1;
            self.line += 1;
        }
    }
}

fn rule_from_record(record: &StringRecord, line: u64) -> Result<MappingRule, MappingError> {
    if record.len() < 2 {
        return Err(MappingError::MalformedRow {
            line,
            columns: record.len(),
        });
    }
    MappingRule::new(&record[0], &record[1]).ok_or(MappingError::EmptyOriginal { line })
}
