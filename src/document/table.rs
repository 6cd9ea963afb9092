//! Table, Row and Cell structures.
//!
//! Tables are a raw grid of cell text. Merged "Key: Value" cells are passed
//! through unparsed; [`split_key_values`] splits them for callers that need it.

/// Vertical merge state of a cell (`w:vMerge`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMergeState {
    /// Starts a vertical merge (`<w:vMerge w:val="restart"/>`)
    Restart,
    /// Continues a vertical merge from above (`<w:vMerge/>`)
    Continue,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    grid_span: usize,
    v_merge: Option<VMergeState>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grid_span: 1,
            v_merge: None,
        }
    }

    /// Set the horizontal span and vertical merge state.
    pub fn with_merge(mut self, grid_span: usize, v_merge: Option<VMergeState>) -> Self {
        self.grid_span = grid_span.max(1);
        self.v_merge = v_merge;
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of grid columns the cell covers (`w:gridSpan`), at least 1.
    #[inline]
    pub fn grid_span(&self) -> usize {
        self.grid_span
    }

    #[inline]
    pub fn v_merge(&self) -> Option<VMergeState> {
        self.v_merge
    }
}

/// One table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(Cell::text).collect()
    }

    /// Whether every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.text.trim().is_empty())
    }
}

/// A table: at least one row of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
    position: usize,
    end: usize,
}

impl Table {
    /// Build a table; `None` when there are no rows.
    pub fn new(rows: Vec<Row>, position: usize) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            rows,
            position,
            end: position,
        })
    }

    /// Record the last preorder position covered by the table's subtree.
    pub fn spanning(mut self, end: usize) -> Self {
        self.end = end.max(self.position);
        self
    }

    /// Whether an element at `position` lies inside this table.
    #[inline]
    pub fn contains_position(&self, position: usize) -> bool {
        (self.position..=self.end).contains(&position)
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Preorder position of the source element.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Text grid with vertical merges filled in.
    ///
    /// A cell continuing a vertical merge takes the text of the cell above
    /// it at the same grid column; one entry is produced per `tc`.
    pub fn text_grid(&self) -> Vec<Vec<String>> {
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.rows.len());
        // Text by grid column from the previous row
        let mut above: Vec<(usize, String)> = Vec::new();

        for row in &self.rows {
            let mut texts = Vec::with_capacity(row.cells.len());
            let mut current: Vec<(usize, String)> = Vec::with_capacity(row.cells.len());
            let mut column = 0;

            for cell in &row.cells {
                let text = match cell.v_merge {
                    Some(VMergeState::Continue) if cell.text.trim().is_empty() => above
                        .iter()
                        .find(|(c, _)| *c == column)
                        .map(|(_, t)| t.clone())
                        .unwrap_or_default(),
                    _ => cell.text.clone(),
                };
                current.push((column, text.clone()));
                texts.push(text);
                column += cell.grid_span;
            }

            above = current;
            grid.push(texts);
        }
        grid
    }
}

/// Split merged `Key: Value` text into pairs.
///
/// `"Project Name: Apollo Release: R1"` becomes
/// `[("Project Name", "Apollo"), ("Release", "R1")]`. When several pairs
/// share a line, the words before each inner colon are split into the
/// previous value and the next key at the trailing capitalized words, so
/// multi-word values must sit on their own line.
pub fn split_key_values(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in text.lines() {
        let segments: Vec<&str> = line.split(':').collect();
        if segments.len() < 2 || segments[0].trim().is_empty() {
            continue;
        }

        let mut key = segments[0].trim().to_string();
        let last = segments.len() - 1;
        for (i, segment) in segments.iter().enumerate().skip(1) {
            if i == last {
                pairs.push((key, segment.trim().to_string()));
                break;
            }
            let (value, next_key) = split_value_and_label(segment.trim());
            pairs.push((std::mem::replace(&mut key, next_key), value));
        }
    }
    pairs
}

/// `"Apollo Release Name"` → `("Apollo", "Release Name")`.
///
/// The label is the longest run of trailing capitalized words that still
/// leaves at least one word for the value.
fn split_value_and_label(segment: &str) -> (String, String) {
    let words: Vec<&str> = segment.split_whitespace().collect();
    if words.len() < 2 {
        return (String::new(), segment.to_string());
    }

    let mut label_start = words.len() - 1;
    while label_start > 1 && words[label_start - 1].starts_with(|c: char| c.is_uppercase()) {
        label_start -= 1;
    }
    (words[..label_start].join(" "), words[label_start..].join(" "))
}
