use console::style;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(56));
    }

    /// Aligned `label  value` line
    pub fn metric(&self, label: &str, value: &str) {
        println!("  {:<28} {}", style(label).dim(), style(value).cyan());
    }

    /// Bold column header row
    pub fn table_header<S: AsRef<str>>(&self, columns: &[(S, usize)]) {
        println!("{}", style(Self::row(columns)).bold());
    }

    /// Plain table row with fixed column widths
    pub fn table_row<S: AsRef<str>>(&self, columns: &[(S, usize)]) {
        println!("{}", Self::row(columns));
    }

    fn row<S: AsRef<str>>(columns: &[(S, usize)]) -> String {
        columns
            .iter()
            .map(|(text, width)| format!("{:<width$}", text.as_ref(), width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    /// Multi-line answer block, indented
    pub fn block(&self, text: &str) {
        for line in text.lines() {
            println!("  {}", line);
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
