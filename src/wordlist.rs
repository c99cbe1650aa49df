use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Reader};

use crate::error::SourceLoadError;
use crate::logger;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
const COMMA_EXTENSIONS: &[&str] = &["csv"];
const TAB_EXTENSIONS: &[&str] = &["tsv", "txt"];

/// Missing-value marker that spreadsheet exports leave in empty cells.
const MISSING_SENTINEL: &str = "nan";

/// How columns of a word list are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Meanings when there are at least two columns, a flat pool otherwise.
    #[default]
    Auto,
    /// Every column is a pool of words; no meanings.
    Flat,
    /// Column 0 is the word, column 1 the meaning, column 2 an optional example.
    WithMeanings,
}

impl LoadMode {
    pub fn next(self) -> Self {
        match self {
            LoadMode::Auto => LoadMode::Flat,
            LoadMode::Flat => LoadMode::WithMeanings,
            LoadMode::WithMeanings => LoadMode::Auto,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoadMode::Auto => "Auto",
            LoadMode::Flat => "Words only",
            LoadMode::WithMeanings => "Words + meanings",
        }
    }
}

/// A word together with whatever the list says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub meaning: Option<String>,
    pub example: Option<String>,
}

/// Raw cells of a word list with the header row removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: usize,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Splits off the header row; the header only contributes to the column count.
    pub fn from_records(records: Vec<Vec<String>>) -> Self {
        let mut records = records.into_iter();
        let header = records.next().unwrap_or_default();
        let rows: Vec<Vec<String>> = records.collect();
        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);
        Self { columns, rows }
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }
}

/// The loaded word list. Meaning and example lookups are keyed by the lowercased word.
#[derive(Debug, Clone, Default)]
pub struct WordStore {
    words: Vec<String>,
    meanings: HashMap<String, String>,
    examples: HashMap<String, String>,
    mode: LoadMode,
}

impl WordStore {
    pub fn load(path: &Path, mode: LoadMode) -> Result<Self, SourceLoadError> {
        let table = read_table(path)?;
        let store = Self::from_table(&table, mode)?;
        logger::log(&format!(
            "Loaded {} words from {} ({})",
            store.len(),
            path.display(),
            store.mode.label()
        ));
        Ok(store)
    }

    pub fn from_table(table: &Table, mode: LoadMode) -> Result<Self, SourceLoadError> {
        if table.columns == 0 {
            return Err(SourceLoadError::NoColumns);
        }

        let mode = match mode {
            LoadMode::Auto if table.columns >= 2 => LoadMode::WithMeanings,
            LoadMode::Auto => LoadMode::Flat,
            other => other,
        };

        let store = match mode {
            LoadMode::WithMeanings => {
                if table.columns < 2 {
                    return Err(SourceLoadError::TooFewColumns {
                        required: 2,
                        found: table.columns,
                    });
                }
                Self::with_meanings(table)
            }
            _ => Self::flat(table),
        };

        if store.words.is_empty() {
            return Err(SourceLoadError::NoWords);
        }
        Ok(store)
    }

    fn flat(table: &Table) -> Self {
        let mut words = Vec::new();
        for column in 0..table.columns {
            for row in 0..table.rows.len() {
                if let Some(word) = table.cell(row, column).and_then(usable) {
                    words.push(word);
                }
            }
        }
        Self {
            words,
            mode: LoadMode::Flat,
            ..Self::default()
        }
    }

    fn with_meanings(table: &Table) -> Self {
        let mut store = Self {
            mode: LoadMode::WithMeanings,
            ..Self::default()
        };

        for row in 0..table.rows.len() {
            let word = table.cell(row, 0).and_then(usable);
            let meaning = table.cell(row, 1).and_then(usable);
            let (Some(word), Some(meaning)) = (word, meaning) else {
                continue;
            };

            let key = word.to_lowercase();
            store.meanings.insert(key.clone(), meaning);
            match table.cell(row, 2).and_then(usable) {
                Some(example) => {
                    store.examples.insert(key, example);
                }
                None => {
                    store.examples.remove(&key);
                }
            }
            store.words.push(word);
        }

        store
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The mode actually used, with `Auto` already resolved.
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn meaning(&self, word: &str) -> Option<&str> {
        self.meanings.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn example(&self, word: &str) -> Option<&str> {
        self.examples.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn entry(&self, word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            meaning: self.meaning(word).map(str::to_string),
            example: self.example(word).map(str::to_string),
        }
    }
}

/// Trims a cell and drops it when it is blank or the missing-value sentinel.
fn usable(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(MISSING_SENTINEL) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|ext| {
        SPREADSHEET_EXTENSIONS.contains(&ext.as_str())
            || COMMA_EXTENSIONS.contains(&ext.as_str())
            || TAB_EXTENSIONS.contains(&ext.as_str())
    })
}

/// Lists word-list files directly inside `dir`, sorted by path.
pub fn discover_wordlists(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_supported(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

pub fn deck_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn read_table(path: &Path) -> Result<Table, SourceLoadError> {
    if !path.exists() {
        return Err(SourceLoadError::NotFound(path.to_path_buf()));
    }

    match extension(path).as_deref() {
        Some(ext) if SPREADSHEET_EXTENSIONS.contains(&ext) => read_spreadsheet(path),
        Some(ext) if COMMA_EXTENSIONS.contains(&ext) => read_delimited(path, ','),
        Some(ext) if TAB_EXTENSIONS.contains(&ext) => read_delimited(path, '\t'),
        _ => Err(SourceLoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read_delimited(path: &Path, delimiter: char) -> Result<Table, SourceLoadError> {
    let content = fs::read_to_string(path).map_err(|source| SourceLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_delimited(&content, delimiter))
}

pub fn parse_delimited(content: &str, delimiter: char) -> Table {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let records = split_records(content, delimiter)
        .into_iter()
        .filter(|record| !record.trim().is_empty())
        .map(|record| parse_delimited_line(record, delimiter))
        .collect();
    Table::from_records(records)
}

/// Splits on line breaks that are not inside a quoted field.
fn split_records(content: &str, delimiter: char) -> Vec<&str> {
    let mut records = Vec::new();
    let mut chars = content.char_indices().peekable();
    let mut start = 0;
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some((i, c)) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek().is_some_and(|&(_, next)| next == '"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            '\n' if !in_quotes => {
                records.push(content[start..i].trim_end_matches('\r'));
                start = i + 1;
                at_field_start = true;
            }
            c if c == delimiter && !in_quotes => {
                at_field_start = true;
            }
            _ => {
                at_field_start = false;
            }
        }
    }

    if start < content.len() {
        records.push(content[start..].trim_end_matches('\r'));
    }
    records
}

fn read_spreadsheet(path: &Path) -> Result<Table, SourceLoadError> {
    let spreadsheet_error = |source| SourceLoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceLoadError::EmptySheet(path.to_path_buf()))?
        .map_err(spreadsheet_error)?;

    let records = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    Ok(Table::from_records(records))
}

/// Splits one record into fields. Quoted fields may contain the delimiter and `""` escapes.
pub fn parse_delimited_line(line: &str, delimiter: char) -> Vec<String> {
    let mut chars = line.chars().peekable();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes && current.is_empty() => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            c if c == delimiter && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current);
    fields
}
