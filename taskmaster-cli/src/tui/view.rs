use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
};
use std::time::Instant;
use taskmaster_core::{Stats, Task};

use crate::tui::app::{App, Focus};
use crate::tui::row::RowEditor;

pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_dashboard(f, chunks[1], &app.stats(), app.progress_value(now));
    draw_form(f, chunks[2], app);
    draw_tasks(f, chunks[3], app);
    draw_help(f, chunks[4], app);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            "Task Master",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Organize your life with precision.",
            Style::default().fg(Color::Gray),
        )),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_dashboard(f: &mut Frame, area: Rect, stats: &Stats, progress: f64) {
    let block = Block::default().borders(Borders::ALL).title("dashboard");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    let cells = [
        (stats.total.to_string(), "TOTAL TASKS", Color::Cyan),
        (stats.pending.to_string(), "PENDING", Color::Yellow),
        (stats.completed.to_string(), "COMPLETED", Color::Green),
        (format!("{}%", stats.percentage), "PROGRESS", Color::Blue),
    ];
    for ((value, label, color), col) in cells.into_iter().zip(cols.iter()) {
        let cell = Paragraph::new(Text::from(vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(cell, *col);
    }

    let caption = Paragraph::new(Line::from(vec![
        Span::styled("Task Completion Rate  ", Style::default().fg(Color::Gray)),
        Span::styled(stats.caption(), Style::default().fg(Color::Gray)),
    ]));
    f.render_widget(caption, rows[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", progress));
    f.render_widget(gauge, rows[2]);
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus() == Focus::Form;
    let form = app.form();

    let title = if form.can_submit() {
        "new task  [Enter] Add Task"
    } else {
        "new task"
    };
    let border = if focused { Color::Cyan } else { Color::DarkGray };

    let body = if form.input().is_empty() && !focused {
        Line::from(Span::styled(
            "Enter your task here...",
            Style::default().fg(Color::DarkGray),
        ))
    } else if focused {
        Line::from(vec![Span::raw(form.input().to_string()), Span::raw("▏")])
    } else {
        Line::from(form.input().to_string())
    };

    let widget = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn draw_tasks(f: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let block = Block::default().borders(Borders::ALL).title("tasks");

    if snapshot.is_empty() {
        let empty = Paragraph::new(Text::from(vec![
            Line::raw(""),
            Line::from(Span::styled(
                "No tasks yet",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Start by adding your first task above.",
                Style::default().fg(Color::Gray),
            )),
        ]))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = snapshot
        .iter()
        .map(|task| task_item(task, app.editor(task.id)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if app.focus() == Focus::List {
        state.select(Some(app.selected()));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn task_item<'a>(task: &'a Task, editor: Option<&'a RowEditor>) -> ListItem<'a> {
    let editing = editor.is_some_and(RowEditor::is_editing);
    let text = editor.map_or(task.text.as_str(), |e| e.display_text(task));

    let checkbox = if task.completed {
        Span::styled("[x] ", Style::default().fg(Color::Green))
    } else {
        Span::styled("[ ] ", Style::default().fg(Color::DarkGray))
    };

    let text_style = if editing {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
    } else if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };

    let badge = if task.completed {
        Span::styled("  Completed", Style::default().fg(Color::Green))
    } else {
        Span::styled("  Pending", Style::default().fg(Color::Yellow))
    };

    let mut spans = vec![checkbox, Span::styled(text, text_style)];
    if editing {
        spans.push(Span::raw("▏"));
    }
    spans.push(badge);
    ListItem::new(Line::from(spans))
}

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let editing = app
        .snapshot()
        .tasks()
        .get(app.selected())
        .and_then(|t| app.editor(t.id))
        .is_some_and(RowEditor::is_editing);

    let hint = if editing {
        "Enter=save  Esc=cancel"
    } else {
        match app.focus() {
            Focus::Form => "Enter=add  Tab=tasks  Esc=quit",
            Focus::List => "Space=toggle  e=edit  d=delete  Tab=new task  q=quit",
        }
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiSection;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use taskmaster_core::{FixedClock, MemoryStorage, TaskActions, TaskStore};

    fn render(app: &App, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| draw(f, app, now)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn empty_state_shows_hint_and_zero_counts() {
        let store = TaskStore::open_with_clock(MemoryStorage::new(), FixedClock(1));
        let now = Instant::now();
        let app = App::new(store, &UiSection::default(), now);

        let screen = render(&app, now);
        assert!(screen.contains("No tasks yet"));
        assert!(screen.contains("0 of 0 tasks"));
        assert!(screen.contains("TOTAL TASKS"));
    }

    #[test]
    fn rows_show_text_and_status() {
        let mut store = TaskStore::open_with_clock(MemoryStorage::new(), FixedClock(1));
        let id = store.add("Buy milk").unwrap();
        store.add("Walk dog").unwrap();
        store.toggle_complete(id);
        let now = Instant::now();
        let mut app = App::new(store, &UiSection::default(), now);
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), now);

        let screen = render(&app, now);
        assert!(screen.contains("Buy milk"));
        assert!(screen.contains("Walk dog"));
        assert!(screen.contains("Completed"));
        assert!(screen.contains("Pending"));
        assert!(screen.contains("1 of 2 tasks"));
        assert!(screen.contains("50%"));
    }
}
