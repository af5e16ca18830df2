//! Per-run report assembly.
//!
//! Each run appends one report to the log file: a header block naming the
//! input file, the output file, and the run timestamp, followed by one
//! labeled section per analysis step. Frequency tables render in the
//! style of `uniq -c`: right-aligned count, then the key, ascending by
//! key value.

use crate::frequency::FrequencyTable;

/// A run report under assembly.
///
/// Sections are appended in pipeline order and rendered as one text block
/// ready to append to the log file.
#[derive(Debug, Clone)]
pub struct Report {
    text: String,
}

impl Report {
    /// Start a report with the standard header block.
    pub fn new(input: &str, output: &str, timestamp: &str) -> Self {
        let mut text = String::new();
        text.push_str("============================================================\n");
        text.push_str(&format!("Input:  {}\n", input));
        text.push_str(&format!("Output: {}\n", output));
        text.push_str(&format!("Date:   {}\n", timestamp));
        Self { text }
    }

    /// Append a labeled section.
    ///
    /// Body text is normalized to end with exactly one newline.
    pub fn section(&mut self, title: &str, body: &str) {
        self.text.push_str(&format!("\n--- {} ---\n", title));
        self.text.push_str(body.trim_end());
        self.text.push('\n');
    }

    /// The assembled report text.
    pub fn render(&self) -> &str {
        &self.text
    }
}

/// Render a per-character table, one `count symbol` line per key plus a
/// total line. Control characters display escaped so the log stays one
/// line per key.
pub fn render_char_table(table: &FrequencyTable<char>) -> String {
    let mut out = String::new();
    for (&symbol, count) in table.iter() {
        out.push_str(&format!("{:>8} {}\n", count, display_symbol(symbol)));
    }
    out.push_str(&format!("{:>8} total\n", table.total()));
    out
}

/// Render a per-block table, one `count block` line per key plus a total
/// line.
pub fn render_block_table(table: &FrequencyTable<String>) -> String {
    let mut out = String::new();
    for (block, count) in table.iter() {
        out.push_str(&format!("{:>8} {}\n", count, display_block(block)));
    }
    out.push_str(&format!("{:>8} total\n", table.total()));
    out
}

fn display_symbol(symbol: char) -> String {
    match symbol {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        ' ' => "' '".to_string(),
        other => other.to_string(),
    }
}

fn display_block(block: &str) -> String {
    block.replace('\n', "\\n").replace('\r', "\\r")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{count_blocks, count_symbols, BLOCK_WIDTH};

    #[test]
    fn test_header_block() {
        let report = Report::new("capture.txt", "capture.bin", "2025-04-27 14:03:22");
        let text = report.render();
        assert!(text.contains("Input:  capture.txt"));
        assert!(text.contains("Output: capture.bin"));
        assert!(text.contains("Date:   2025-04-27 14:03:22"));
    }

    #[test]
    fn test_sections_in_order() {
        let mut report = Report::new("in", "out", "now");
        report.section("binary artifact", "2 bytes written");
        report.section("entropy", "Entropy = 1.0 bits per byte.\n");
        let text = report.render();

        let artifact_at = text.find("--- binary artifact ---").unwrap();
        let entropy_at = text.find("--- entropy ---").unwrap();
        assert!(artifact_at < entropy_at);
        // Body normalization keeps exactly one trailing newline
        assert!(text.ends_with("Entropy = 1.0 bits per byte.\n"));
    }

    #[test]
    fn test_render_char_table() {
        let table = count_symbols("0010\n");
        let rendered = render_char_table(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].trim(), "1 \\n");
        assert_eq!(lines[1].trim(), "3 0");
        assert_eq!(lines[2].trim(), "1 1");
        assert_eq!(lines[3].trim(), "5 total");
    }

    #[test]
    fn test_render_block_table() {
        let table = count_blocks("0101010101010101", BLOCK_WIDTH);
        let rendered = render_block_table(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim(), "2 01010101");
        assert_eq!(lines[1].trim(), "2 total");
    }

    #[test]
    fn test_block_table_escapes_newlines() {
        let table = count_blocks("0101\n01", BLOCK_WIDTH);
        let rendered = render_block_table(&table);
        assert!(rendered.contains("0101\\n01"));
    }

    #[test]
    fn test_empty_tables_render_total_only() {
        let rendered = render_char_table(&count_symbols(""));
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.contains("0 total"));
    }
}
