use std::path::Path;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use ratatui::style::Color;

lazy_static::lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Convert syntect color to ratatui color
fn to_ratatui_color(color: syntect::highlighting::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Get syntax-highlighted spans for a file.
/// Returns Vec of lines, where each line is Vec of (color, text) pairs.
/// Callers cache the result — highlighting a large file is not cheap.
pub fn highlight_content(name: &str, content: &str) -> Vec<Vec<(Color, String)>> {
    let syntax = SYNTAX_SET
        .find_syntax_for_file(name)
        .ok()
        .flatten()
        .or_else(|| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| SYNTAX_SET.find_syntax_by_extension(ext))
        })
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

    let theme = &THEME_SET.themes["base16-ocean.dark"];

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut result = Vec::new();

    for line in LinesWithEndings::from(content) {
        let ranges: Vec<(Style, &str)> = highlighter.highlight_line(line, &SYNTAX_SET).unwrap_or_default();

        let spans: Vec<(Color, String)> = ranges
            .into_iter()
            .map(|(style, text)| (to_ratatui_color(style.foreground), text.trim_end_matches('\n').to_string()))
            .collect();

        result.push(spans);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_one_entry_per_line() {
        let lines = highlight_content("main.py", "x = 1\ny = 2\n");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn unknown_extension_falls_back_to_plain_text() {
        let lines = highlight_content("notes.unknownext", "hello\n");
        assert_eq!(lines.len(), 1);
        let text: String = lines[0].iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(text, "hello");
    }
}
