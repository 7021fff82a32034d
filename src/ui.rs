use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use hv_base::config::{chars, theme};
use hv_base::panels::fit_width;
use hv_mod_tree::DisplayRow;

use crate::app::{App, HistoryEntry, Page, QueryMode, StatusLevel};

pub fn draw(frame: &mut Frame, app: &App) {
    let [header, body, status, hints] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, app, header);
    match app.page {
        Page::RepoSearch => draw_repo_search(frame, app, body),
        Page::Tree => draw_tree(frame, app, body),
        Page::File => draw_file(frame, app, body),
        Page::Assistant => draw_assistant(frame, app, body),
        Page::Resources => draw_resources(frame, app, body),
        Page::Editor => draw_editor(frame, app, body),
    }
    draw_status(frame, app, status);
    draw_hints(frame, app, hints);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    let mut title = vec![Span::styled("hubview", Style::default().fg(theme::accent()).bold())];
    if let Some(key) = &app.repo {
        title.push(Span::styled(format!("  {}/{}", key.owner, key.repo), Style::default().fg(theme::text())));
    }
    lines.push(Line::from(title));

    if let Some(info) = &app.repo_info {
        let mut meta = format!(
            "{} {}  ⑂ {}  👁 {}",
            chars::DOT,
            info.stargazers_count,
            info.forks_count,
            info.watchers_count
        );
        if let Some(language) = &info.language {
            meta.push_str(&format!("  [{}]", language));
        }
        if let Some(description) = &info.description {
            meta.push_str("  ");
            meta.push_str(description);
        }
        lines.push(Line::from(Span::styled(
            fit_width(&meta, area.width as usize),
            Style::default().fg(theme::text_muted()),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_repo_search(frame: &mut Frame, app: &App, area: Rect) {
    let [input_area, list_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(app.username_input.clone(), Style::default().fg(theme::text())),
        Span::styled("▏", Style::default().fg(theme::accent())),
    ]))
    .block(titled_block("GitHub username"));
    frame.render_widget(input, input_area);

    let height = list_area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(app.repo_selected, app.repos.len(), height);
    let lines: Vec<Line> = app
        .repos
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, repo)| {
            let style = if i == app.repo_selected {
                Style::default().fg(theme::accent()).bg(theme::bg_surface()).bold()
            } else {
                Style::default().fg(theme::text())
            };
            Line::from(Span::styled(format!(" {}", repo.name), style))
        })
        .collect();
    let title = match app.repos.len() {
        0 => "Repositories".to_string(),
        n => format!("Repositories ({})", n),
    };
    frame.render_widget(Paragraph::new(lines).block(titled_block(&title)), list_area);
}

fn draw_tree(frame: &mut Frame, app: &App, area: Rect) {
    let height = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(app.tree_selected, app.rows.len(), height);
    let width = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> =
        app.rows.iter().enumerate().skip(offset).take(height).map(|(i, row)| tree_row_line(app, i, row, width)).collect();
    frame.render_widget(Paragraph::new(lines).block(titled_block("File Structure")), area);
}

fn tree_row_line(app: &App, index: usize, row: &DisplayRow, width: usize) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    let text = if row.kind.is_dir() {
        let triangle = if row.expanded { chars::DIR_OPEN } else { chars::DIR_CLOSED };
        format!("{}{} {}/", indent, triangle, row.name)
    } else {
        format!("{}  {}", indent, row.name)
    };
    let mut style = if row.kind.is_dir() {
        Style::default().fg(theme::accent())
    } else {
        Style::default().fg(theme::text())
    };
    if index == app.tree_selected {
        style = style.bg(theme::bg_surface()).bold();
    }
    Line::from(Span::styled(fit_width(&text, width), style))
}

fn draw_file(frame: &mut Frame, app: &App, area: Rect) {
    let Some(file) = &app.file else {
        frame.render_widget(Paragraph::new("No file selected").block(titled_block("File")), area);
        return;
    };
    let lines: Vec<Line> = app
        .file_highlight
        .iter()
        .map(|spans| {
            Line::from(
                spans
                    .iter()
                    .map(|(color, text)| Span::styled(text.clone(), Style::default().fg(*color)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    let paragraph =
        Paragraph::new(lines).scroll((app.file_scroll, 0)).block(titled_block(&format!("File: {}", file.path)));
    frame.render_widget(paragraph, area);
}

fn draw_assistant(frame: &mut Frame, app: &App, area: Rect) {
    let [history_area, input_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(area);

    let lines = history_lines(&app.assistant_history);
    frame.render_widget(
        Paragraph::new(lines).scroll((app.assistant_scroll, 0)).block(titled_block("Repository Assistant")),
        history_area,
    );

    let mode = match app.assistant_mode {
        QueryMode::Repository => "Repository Analysis",
        QueryMode::Code => "Code File Analysis",
    };
    frame.render_widget(input_line(&app.assistant_input).block(titled_block(&format!("Ask ({})", mode))), input_area);
}

fn draw_resources(frame: &mut Frame, app: &App, area: Rect) {
    let [results_area, input_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(record) = app.search_history.last() {
        lines.push(Line::from(Span::styled(
            format!("Search: {}  ({})", record.query, record.timestamp),
            Style::default().fg(theme::text_muted()),
        )));
        lines.push(Line::default());
        match &record.digest {
            Some(digest) => {
                for line in digest.lines() {
                    lines.push(Line::from(Span::styled(line.to_string(), Style::default().fg(theme::text()))));
                }
                lines.push(Line::default());
            }
            None => {
                for result in &record.results {
                    lines.push(Line::from(Span::styled(result.title.clone(), Style::default().fg(theme::text()))));
                    lines.push(Line::from(Span::styled(
                        format!("  {}", result.link),
                        Style::default().fg(theme::accent_dim()),
                    )));
                    lines.push(Line::from(Span::styled(
                        format!("  {}", result.snippet),
                        Style::default().fg(theme::text_muted()),
                    )));
                }
            }
        }
    }
    frame.render_widget(
        Paragraph::new(lines).scroll((app.resources_scroll, 0)).block(titled_block("Related Resources")),
        results_area,
    );

    frame.render_widget(
        input_line(&app.resources_input).block(titled_block(&format!("Search ({})", app.search_kind.label()))),
        input_area,
    );
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let Some(editor) = &app.editor else {
        frame.render_widget(Paragraph::new("No file open in the editor").block(titled_block("Editor")), area);
        return;
    };
    let (editor_area, output_area) = if app.run_output.is_some() {
        let [e, o] = Layout::vertical([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area);
        (e, Some(o))
    } else {
        (area, None)
    };

    let height = editor_area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(editor.cursor_row, editor.lines.len(), height);
    let lines: Vec<Line> = editor
        .lines
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, line)| editor_line(editor.cursor_row == i, editor.cursor_col, line))
        .collect();
    let marker = if editor.modified { format!(" {} ", chars::DOT) } else { String::new() };
    frame.render_widget(
        Paragraph::new(lines).block(titled_block(&format!("Editing: {}{}", editor.path, marker))),
        editor_area,
    );

    if let (Some(output_area), Some(outcome)) = (output_area, &app.run_output) {
        let mut lines: Vec<Line> = outcome
            .output
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme::text()))))
            .collect();
        let mut meta = format!("status {}", outcome.status_code);
        if let Some(cpu) = &outcome.cpu_time {
            meta.push_str(&format!("  cpu {}s", cpu));
        }
        if let Some(memory) = &outcome.memory {
            meta.push_str(&format!("  mem {}kB", memory));
        }
        lines.push(Line::from(Span::styled(meta, Style::default().fg(theme::text_muted()))));
        frame.render_widget(Paragraph::new(lines).block(titled_block("Output")), output_area);
    }
}

fn editor_line(is_cursor_line: bool, cursor_col: usize, line: &str) -> Line<'static> {
    if !is_cursor_line {
        return Line::from(Span::styled(line.to_string(), Style::default().fg(theme::text())));
    }
    // Show the cursor as a reversed cell
    let before: String = line.chars().take(cursor_col).collect();
    let at: String = line.chars().skip(cursor_col).take(1).collect();
    let after: String = line.chars().skip(cursor_col + 1).collect();
    let cursor_text = if at.is_empty() { " ".to_string() } else { at };
    Line::from(vec![
        Span::styled(before, Style::default().fg(theme::text())),
        Span::styled(cursor_text, Style::default().fg(theme::text()).reversed()),
        Span::styled(after, Style::default().fg(theme::text())),
    ])
}

fn history_lines(history: &[HistoryEntry]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in history {
        lines.push(Line::from(vec![
            Span::styled("You asked: ", Style::default().fg(theme::user()).bold()),
            Span::styled(format!("({})", entry.timestamp), Style::default().fg(theme::text_muted())),
        ]));
        for line in entry.query.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), Style::default().fg(theme::text()))));
        }
        lines.push(Line::from(Span::styled("AI response:", Style::default().fg(theme::assistant()).bold())));
        for line in entry.response.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), Style::default().fg(theme::text()))));
        }
        lines.push(Line::from(Span::styled(chars::HORIZONTAL.repeat(24), Style::default().fg(theme::border()))));
    }
    lines
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let (color, prefix) = match status.level {
        StatusLevel::Info => (theme::success(), chars::DOT),
        StatusLevel::Warning => (theme::warning(), "!"),
        StatusLevel::Error => (theme::error(), chars::CROSS),
    };
    let text = fit_width(&format!("{} {}", prefix, status.text), area.width as usize);
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color)))), area);
}

fn draw_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.page {
        Page::RepoSearch => "enter list/open · ↑↓ select · ctrl-q quit",
        Page::Tree => "enter expand/open · ↑↓ select · ctrl-a assistant · ctrl-o resources · esc back",
        Page::File => "↑↓ scroll · ctrl-e edit · ctrl-a assistant · esc back",
        Page::Assistant => "enter ask · ctrl-x mode · ctrl-y apply code · ctrl-l clear · esc back",
        Page::Resources => "enter search · ctrl-x kind · ctrl-l clear · esc back",
        Page::Editor => "ctrl-s save · ctrl-r run · ctrl-d discard · esc back",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(theme::text_muted())))),
        area,
    );
}

fn input_line(input: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(input.to_string(), Style::default().fg(theme::text())),
        Span::styled("▏", Style::default().fg(theme::accent())),
    ]))
}

fn titled_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::border()))
        .title(title.to_string())
}

/// First visible index so the selected row stays inside a `height`-row window.
fn scroll_offset(selected: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    let max_offset = len - height;
    selected.saturating_sub(height / 2).min(max_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_offset_fits_short_lists() {
        assert_eq!(scroll_offset(3, 5, 10), 0);
    }

    #[test]
    fn scroll_offset_centers_selection() {
        assert_eq!(scroll_offset(10, 100, 10), 5);
    }

    #[test]
    fn scroll_offset_clamps_at_end() {
        assert_eq!(scroll_offset(99, 100, 10), 90);
    }
}
