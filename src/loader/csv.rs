// src/loader/csv.rs

//! Minimal CSV reader for question sheets.
//!
//! The first non-blank line is the header. Header names are trimmed and lowercased and
//! become the keys of every following record.
//!
//! Field grammar:
//! * a field is either a bare run of characters up to the next comma, or a double-quoted
//!   span that may contain commas, newlines and `""` (an escaped quote);
//! * one layer of surrounding quotes is stripped and every field is trimmed;
//! * empty fields keep their position (`a,,b` has three fields);
//! * a row whose fields are all empty, or whose quote is never closed, is malformed and
//!   gets skipped with a warning.

use std::collections::HashMap;

use thiserror::Error;

/// One data row, keyed by lowercased header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRecord {
    fields: HashMap<String, String>,
}

impl CsvRecord {
    /// Value of `key`, or `""` when the column does not exist.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("row has no fields")]
    NoFields,
    #[error("quoted field is never closed")]
    UnterminatedQuote,
}

/// Parses CSV text into records. Malformed rows are logged and dropped.
pub fn parse(text: &str) -> Vec<CsvRecord> {
    let mut lines = logical_lines(text)
        .into_iter()
        .filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let headers: Vec<String> = header_line
        .split(',')
        .map(|header| header.trim().to_lowercase())
        .collect();

    lines
        .filter_map(|line| match tokenize(line) {
            Ok(tokens) => Some(zip_record(&headers, tokens)),
            Err(e) => {
                tracing::warn!("Skipping malformed row {:?}: {}", line, e);
                None
            }
        })
        .collect()
}

/// Splits on newlines that are not inside a quoted field. Trailing `\r` is dropped.
///
/// A quote only opens a quoted field when it is the first non-blank character of the
/// field. Anywhere else (`12" ruler`) it is plain text.
fn logical_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if in_quotes {
            if c == '"' && chars.next_if(|(_, next)| *next == '"').is_none() {
                in_quotes = false;
            }
            continue;
        }

        match c {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            '\n' => {
                lines.push(text[start..i].trim_end_matches('\r'));
                start = i + 1;
                field_start = true;
            }
            ',' => field_start = true,
            c if c.is_whitespace() => {}
            _ => field_start = false,
        }
    }

    if start < text.len() {
        lines.push(text[start..].trim_end_matches('\r'));
    }

    lines
}

/// Splits one logical line into trimmed fields.
pub fn tokenize(line: &str) -> Result<Vec<String>, RowError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            let mut closed = false;
            while let Some(c) = chars.next() {
                if c != '"' {
                    field.push(c);
                } else if chars.next_if_eq(&'"').is_some() {
                    field.push('"');
                } else {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(RowError::UnterminatedQuote);
            }
        }

        // Bare field, or stray text after a closing quote.
        while let Some(c) = chars.next_if(|c| *c != ',') {
            field.push(c);
        }

        tokens.push(field.trim().to_string());

        if chars.next().is_none() {
            break;
        }
    }

    if tokens.iter().all(String::is_empty) {
        return Err(RowError::NoFields);
    }

    Ok(tokens)
}

fn zip_record(headers: &[String], tokens: Vec<String>) -> CsvRecord {
    let mut tokens = tokens.into_iter();
    let fields = headers
        .iter()
        .map(|header| (header.clone(), tokens.next().unwrap_or_default()))
        .collect();

    CsvRecord { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_keyed_by_lowercased_header() {
        let records = parse("Category, Question ,ANSWER\nHistory,Who?,Me\nScience,What?,That\n");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("category"), "History");
        assert_eq!(records[0].get("question"), "Who?");
        assert_eq!(records[1].get("answer"), "That");
        assert!(records.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn quoted_field_keeps_embedded_comma() {
        let records = parse("h1,h2,h3\n\"a,b\",c,d\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("h1"), "a,b");
        assert_eq!(records[0].get("h2"), "c");
        assert_eq!(records[0].get("h3"), "d");
    }

    #[test]
    fn blank_lines_and_all_comma_rows_are_dropped() {
        let records = parse("h1,h2\n\na,b\n,,\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("h1"), "a");
        assert_eq!(records[0].get("h2"), "b");
    }

    #[test]
    fn short_rows_are_padded_with_empty_strings() {
        let records = parse("a,b,c\n1\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0].get("a"), "1");
        assert_eq!(records[0].get("b"), "");
        assert_eq!(records[0].get("c"), "");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let records = parse("a,b\n1,2,3\n");

        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0].get("b"), "2");
    }

    #[test]
    fn empty_fields_keep_their_position() {
        let records = parse("a,b,c\n1,,3\n");

        assert_eq!(records[0].get("a"), "1");
        assert_eq!(records[0].get("b"), "");
        assert_eq!(records[0].get("c"), "3");
    }

    #[test]
    fn escaped_quotes_and_embedded_newlines() {
        let text = "q,a\n\"He said \"\"hi\"\"\",\"line one\nline two\"\nnext,row\n";
        let records = parse(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("q"), "He said \"hi\"");
        assert_eq!(records[0].get("a"), "line one\nline two");
        assert_eq!(records[1].get("q"), "next");
    }

    #[test]
    fn crlf_line_endings() {
        let records = parse("a,b\r\n1,2\r\n");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("b"), "2");
    }

    #[test]
    fn unterminated_quote_drops_only_that_row() {
        assert_eq!(tokenize("\"open,x"), Err(RowError::UnterminatedQuote));

        let records = parse("a,b\n1,2\n\"broken,3\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), "1");
    }

    #[test]
    fn quote_inside_bare_field_is_plain_text() {
        let records = parse(
            "category,question,answer\nSize,How long is a 12\" ruler?,One foot\nSpace,Closest star?,Sun\nFood,Guacamole base?,Avocado\n",
        );

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("question"), "How long is a 12\" ruler?");
        assert_eq!(records[0].get("answer"), "One foot");
        assert_eq!(records[1].get("category"), "Space");
        assert_eq!(records[2].get("answer"), "Avocado");
    }

    #[test]
    fn escaped_quote_does_not_end_the_quoted_field() {
        let records = parse("q,a\n\"say \"\"x\"\"\nthen\",1\nnext,2\n");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("q"), "say \"x\"\nthen");
        assert_eq!(records[1].get("a"), "2");
    }

    #[test]
    fn header_only_or_empty_input_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n").is_empty());
        assert!(parse("category,question,answer\n").is_empty());
    }

    #[test]
    fn tokens_are_trimmed_inside_and_outside_quotes() {
        assert_eq!(
            tokenize("  x ,\"  y  \" , z").unwrap(),
            vec!["x".to_string(), "y".to_string(), "z".to_string()]
        );
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let records = parse("a\n1\n");
        assert!(!records[0].contains_key("b"));
        assert_eq!(records[0].get("b"), "");
    }
}
