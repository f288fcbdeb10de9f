//! Plain-text table rendering.

/// Table column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            max_width: None,
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Table structure
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<impl Into<String>>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Calculate column widths in characters
    fn calculate_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.header.chars().count())
            .collect();

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        for (i, col) in self.columns.iter().enumerate() {
            if let Some(max) = col.max_width {
                widths[i] = widths[i].min(max);
            }
        }

        widths
    }

    /// Render the table to a string
    pub fn render(&self) -> String {
        let widths = self.calculate_widths();
        let mut output = String::new();

        let header: Vec<_> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| format_cell(&col.header, w))
            .collect();
        push_line(&mut output, &header);

        let sep: Vec<_> = widths.iter().map(|&w| "-".repeat(w)).collect();
        push_line(&mut output, &sep);

        for row in &self.rows {
            let cells: Vec<_> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format_cell(cell, w))
                .collect();
            push_line(&mut output, &cells);
        }

        output
    }
}

fn push_line(output: &mut String, cells: &[String]) {
    output.push_str(cells.join("   ").trim_end());
    output.push('\n');
}

fn format_cell(content: &str, width: usize) -> String {
    let content = super::truncate(content, width);
    let pad = width.saturating_sub(content.chars().count());
    format!("{content}{}", " ".repeat(pad))
}
