use std::fmt;

/// One data row of a parsed CSV file, keyed by column header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    fields: Vec<(String, String)>,
    extra: Vec<String>,
}

impl TableRow {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == header)
            .map(|(_, value)| value.as_str())
    }

    /// Header/value pairs in column order. Short rows stop early.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Cells beyond the last header.
    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssueKind {
    TooFewFields { expected: usize, found: usize },
    TooManyFields { expected: usize, found: usize },
    Malformed(String),
}

/// A recoverable problem noticed while parsing. `row` is zero-based over data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub row: usize,
    pub kind: ParseIssueKind,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseIssueKind::TooFewFields { expected, found } => write!(
                f,
                "row {}: expected {expected} fields, found {found}",
                self.row
            ),
            ParseIssueKind::TooManyFields { expected, found } => write!(
                f,
                "row {}: expected {expected} fields, found {found}",
                self.row
            ),
            ParseIssueKind::Malformed(message) => write!(f, "row {}: {message}", self.row),
        }
    }
}

/// Rows of a CSV file whose first record names the columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTable {
    headers: Vec<String>,
    rows: Vec<TableRow>,
    issues: Vec<ParseIssue>,
}

impl ParsedTable {
    /// Parses CSV bytes. Never fails: ragged rows are kept and reported in
    /// [`ParsedTable::issues`], and a reader error ends the table early.
    pub fn parse(bytes: &[u8]) -> Self {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let mut table = ParsedTable::default();
        match reader.byte_headers() {
            Ok(record) => {
                table.headers = record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect();
            }
            Err(err) => {
                table.issues.push(ParseIssue {
                    row: 0,
                    kind: ParseIssueKind::Malformed(err.to_string()),
                });
                return table;
            }
        }
        if let Some(first) = table.headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }
        // A file with no content at all has no columns.
        if table.headers.len() == 1 && table.headers[0].is_empty() {
            table.headers.clear();
        }

        let expected = table.headers.len();
        for (index, record) in reader.byte_records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    table.issues.push(ParseIssue {
                        row: index,
                        kind: ParseIssueKind::Malformed(err.to_string()),
                    });
                    break;
                }
            };
            let cells: Vec<String> = record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();

            let found = cells.len();
            if found < expected {
                table.issues.push(ParseIssue {
                    row: index,
                    kind: ParseIssueKind::TooFewFields { expected, found },
                });
            } else if found > expected {
                table.issues.push(ParseIssue {
                    row: index,
                    kind: ParseIssueKind::TooManyFields { expected, found },
                });
            }

            let mut cells = cells.into_iter();
            let fields = table
                .headers
                .iter()
                .zip(cells.by_ref())
                .map(|(header, cell)| (header.clone(), cell))
                .collect();
            table.rows.push(TableRow {
                fields,
                extra: cells.collect(),
            });
        }

        table
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
