//! Output formatting for the CLI.

use colored::*;
use parley_domain::symbols::{entries, SymbolFamily};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Tally of a run over a dataset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Records written or accepted
    pub succeeded: usize,
    /// Records that failed
    pub failed: usize,
    /// Clauses skipped because they were already present
    pub skipped: usize,
    /// Non-fatal findings on succeeded records
    pub warnings: usize,
}

impl Summary {
    /// Records looked at
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Run summary as a table.
    pub fn summary_table(&self, title: &str, summary: &Summary) -> String {
        let mut builder = Builder::default();
        builder.push_record([title, "Count"]);
        builder.push_record(["Succeeded".to_string(), summary.succeeded.to_string()]);
        builder.push_record(["Failed".to_string(), summary.failed.to_string()]);
        if summary.skipped > 0 {
            builder.push_record(["Skipped".to_string(), summary.skipped.to_string()]);
        }
        builder.push_record(["Warnings".to_string(), summary.warnings.to_string()]);
        builder.push_record(["Total".to_string(), summary.total().to_string()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Every registry entry as a table.
    pub fn symbols_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Family", "Value", "Symbol"]);
        for family in SymbolFamily::ALL {
            for (value, glyph) in entries(*family) {
                builder.push_record([family.to_string(), value.to_string(), glyph.to_string()]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Section header for a rendered record.
    pub fn header(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Indented detail line under a message.
    pub fn detail(&self, message: &str) -> String {
        self.colorize(&format!("    {}", message), "dimmed")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "dimmed" => text.dimmed().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_table() {
        let formatter = Formatter::new(false);
        let summary = Summary {
            succeeded: 4,
            failed: 1,
            skipped: 0,
            warnings: 2,
        };
        let table = formatter.summary_table("Validation", &summary);
        assert!(table.contains("Validation"));
        assert!(table.contains("Failed"));
        assert!(!table.contains("Skipped"));
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn test_symbols_table_lists_every_glyph() {
        let table = Formatter::new(false).symbols_table();
        assert!(table.contains("industry_practice"));
        assert!(table.contains("⬤"));
        assert!(table.contains("⟺"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.detail("x"), "    x");
        assert_eq!(formatter.header("H"), "H");
    }
}
