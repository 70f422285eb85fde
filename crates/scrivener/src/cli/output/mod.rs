//! Output formatting utilities

use console::{style, Style};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Document text framed by `---` separators, as shown in dry-run
pub fn framed(text: &str) -> String {
    format!("\n---\n{}\n---\n", style(text.trim()).dim())
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framed_trims_and_separates() {
        console::set_colors_enabled(false);
        assert_eq!(framed("\n## [1.0.0]\n\n"), "\n---\n## [1.0.0]\n---\n");
    }
}
