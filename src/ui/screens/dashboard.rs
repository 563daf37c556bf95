use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*};

use crate::app::{QueryController, QueryState};
use crate::error::Result;
use crate::fetch::TimeSeriesFunction;
use crate::logging::LogBuffer;
use crate::ui::components::utils::{split_horizontal, split_vertical};
use crate::ui::components::{build_table, header_row, page_rows, page_widths, TerminalGuard};
use crate::ui::styles::{error_style, secondary_line, secondary_span, selection_style, ACCENT};
use crate::utils::{format_fetched_at, truncate_to_width};

const MAX_VISIBLE_SUGGESTIONS: usize = 6;
const FETCH_HINT: &str = "Enter a symbol and choose a series before fetching.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Symbol,
    Suggestions,
    Series,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Symbol | Focus::Suggestions => Focus::Series,
            Focus::Series => Focus::Table,
            Focus::Table => Focus::Symbol,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Symbol | Focus::Suggestions => Focus::Table,
            Focus::Series => Focus::Symbol,
            Focus::Table => Focus::Series,
        }
    }
}

/// What a key press asks the dashboard to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Quit,
    FocusNext,
    FocusPrev,
    EditSymbol(String),
    EnterSuggestions,
    MoveSuggestion(isize),
    SelectSuggestion(usize),
    DismissSuggestions,
    CycleSeries { forward: bool },
    ClearSeries,
    Fetch,
    GoToPage(usize),
}

/// Screen-local state that never reaches the store.
#[derive(Debug, Default)]
pub struct DashboardView {
    pub focus: Focus,
    pub suggestion_cursor: usize,
    pub notice: Option<String>,
}

impl DashboardView {
    /// Keep focus and cursor valid after the store changed underneath us.
    pub fn sync(&mut self, state: &QueryState) {
        if state.suggestions.is_empty() {
            self.suggestion_cursor = 0;
            if self.focus == Focus::Suggestions {
                self.focus = Focus::Symbol;
            }
        } else {
            self.suggestion_cursor = self.suggestion_cursor.min(state.suggestions.len() - 1);
        }
    }
}

pub fn translate_key(
    view: &DashboardView,
    state: &QueryState,
    total_pages: usize,
    key: KeyEvent,
) -> Option<Intent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Intent::Quit);
    }
    match key.code {
        KeyCode::Tab => return Some(Intent::FocusNext),
        KeyCode::BackTab => return Some(Intent::FocusPrev),
        _ => {}
    }

    match view.focus {
        Focus::Symbol => match key.code {
            KeyCode::Down if !state.suggestions.is_empty() => Some(Intent::EnterSuggestions),
            KeyCode::Enter => Some(Intent::Fetch),
            KeyCode::Esc if !state.suggestions.is_empty() => Some(Intent::DismissSuggestions),
            KeyCode::Esc => Some(Intent::Quit),
            _ => edit_symbol(&state.symbol, key),
        },
        Focus::Suggestions => match key.code {
            KeyCode::Up => Some(Intent::MoveSuggestion(-1)),
            KeyCode::Down => Some(Intent::MoveSuggestion(1)),
            KeyCode::Enter => Some(Intent::SelectSuggestion(view.suggestion_cursor)),
            KeyCode::Esc => Some(Intent::DismissSuggestions),
            _ => edit_symbol(&state.symbol, key),
        },
        Focus::Series => match key.code {
            KeyCode::Left | KeyCode::Up => Some(Intent::CycleSeries { forward: false }),
            KeyCode::Right | KeyCode::Down => Some(Intent::CycleSeries { forward: true }),
            KeyCode::Backspace | KeyCode::Delete => Some(Intent::ClearSeries),
            KeyCode::Enter => Some(Intent::Fetch),
            KeyCode::Esc | KeyCode::Char('q') => Some(Intent::Quit),
            _ => None,
        },
        Focus::Table => match key.code {
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
                Some(Intent::GoToPage(state.page.saturating_sub(1).max(1)))
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
                Some(Intent::GoToPage(state.page + 1))
            }
            KeyCode::Home => Some(Intent::GoToPage(1)),
            KeyCode::End => Some(Intent::GoToPage(total_pages.max(1))),
            KeyCode::Enter | KeyCode::Char('r') => Some(Intent::Fetch),
            KeyCode::Esc | KeyCode::Char('q') => Some(Intent::Quit),
            _ => None,
        },
    }
}

fn edit_symbol(current: &str, key: KeyEvent) -> Option<Intent> {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut text = current.to_string();
            text.push(ch);
            Some(Intent::EditSymbol(text))
        }
        KeyCode::Backspace if !current.is_empty() => {
            let mut text = current.to_string();
            text.pop();
            Some(Intent::EditSymbol(text))
        }
        _ => None,
    }
}

/// Step through the enumerated series; an empty selection starts from either end.
pub fn cycle_series(current: Option<TimeSeriesFunction>, forward: bool) -> TimeSeriesFunction {
    match (current, forward) {
        (Some(function), true) => function.next(),
        (Some(function), false) => function.prev(),
        (None, true) => TimeSeriesFunction::ALL[0],
        (None, false) => TimeSeriesFunction::ALL[TimeSeriesFunction::ALL.len() - 1],
    }
}

/// Apply `intent`. Returns `false` when the dashboard should close.
pub fn apply_intent(
    view: &mut DashboardView,
    controller: &mut QueryController,
    intent: Intent,
) -> bool {
    view.notice = None;

    match intent {
        Intent::Quit => return false,
        Intent::FocusNext => view.focus = view.focus.next(),
        Intent::FocusPrev => view.focus = view.focus.prev(),
        Intent::EditSymbol(text) => {
            controller.input_symbol(text);
            view.suggestion_cursor = 0;
        }
        Intent::EnterSuggestions => {
            view.focus = Focus::Suggestions;
            view.suggestion_cursor = 0;
        }
        Intent::MoveSuggestion(delta) => {
            let len = controller.state().suggestions.len();
            if delta < 0 && view.suggestion_cursor == 0 {
                view.focus = Focus::Symbol;
            } else if len > 0 {
                let target = view.suggestion_cursor as isize + delta;
                view.suggestion_cursor = target.clamp(0, len as isize - 1) as usize;
            }
        }
        Intent::SelectSuggestion(index) => {
            controller.select_suggestion(index);
            view.focus = Focus::Symbol;
        }
        Intent::DismissSuggestions => {
            controller.clear_suggestions();
            view.focus = Focus::Symbol;
        }
        Intent::CycleSeries { forward } => {
            let next = cycle_series(controller.state().time_series_function, forward);
            controller.select_function(Some(next));
        }
        Intent::ClearSeries => controller.select_function(None),
        Intent::Fetch => {
            if !controller.request_data() {
                view.notice = Some(FETCH_HINT.to_string());
            }
        }
        Intent::GoToPage(page) => controller.select_page(page),
    }

    view.sync(controller.state());
    true
}

/// Full-screen query dashboard. Must be called from within a tokio runtime.
pub fn run_dashboard(controller: &mut QueryController, logs: Option<&LogBuffer>) -> Result<()> {
    let mut guard = TerminalGuard::new()?;
    let mut view = DashboardView::default();

    loop {
        controller.apply_pending();
        view.sync(controller.state());

        let log_line = logs.and_then(LogBuffer::last);
        let items_per_page = controller.items_per_page();
        guard.terminal_mut().draw(|f| {
            draw(
                f,
                &view,
                controller.state(),
                items_per_page,
                log_line.as_deref(),
            )
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let total_pages = controller
            .state()
            .table_page(items_per_page)
            .map_or(0, |page| page.total_pages);
        if let Some(intent) = translate_key(&view, controller.state(), total_pages, key) {
            if !apply_intent(&mut view, controller, intent) {
                break;
            }
        }
    }

    guard.restore()
}

fn draw(
    f: &mut Frame<'_>,
    view: &DashboardView,
    state: &QueryState,
    items_per_page: usize,
    log_line: Option<&str>,
) {
    let suggestion_height = if state.suggestions.is_empty() {
        0
    } else {
        state.suggestions.len().min(MAX_VISIBLE_SUGGESTIONS) as u16 + 2
    };

    let rows = split_vertical(
        f.size(),
        &[
            Constraint::Length(3),
            Constraint::Length(suggestion_height),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ],
    );
    let inputs = split_horizontal(
        rows[0],
        &[
            Constraint::Min(20),
            Constraint::Length(30),
            Constraint::Length(11),
        ],
    );

    draw_symbol_input(f, inputs[0], view, state);
    draw_series_selector(f, inputs[1], view, state);
    draw_fetch_button(f, inputs[2], state);
    if suggestion_height > 0 {
        draw_suggestions(f, rows[1], view, state);
    }
    f.render_widget(Paragraph::new(status_line(view, state)), rows[2]);
    draw_table(f, rows[3], view, state, items_per_page);
    f.render_widget(Paragraph::new(page_window_line(state, items_per_page)), rows[4]);

    let footer = match log_line {
        Some(line) => secondary_line(line.to_string()),
        None => secondary_line(help_text(view.focus)),
    };
    f.render_widget(Paragraph::new(footer), rows[5]);
}

fn focus_block(title: impl Into<String>, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title.into());
    if focused {
        block.border_style(Style::default().fg(ACCENT))
    } else {
        block
    }
}

fn draw_symbol_input(f: &mut Frame<'_>, area: Rect, view: &DashboardView, state: &QueryState) {
    let focused = matches!(view.focus, Focus::Symbol | Focus::Suggestions);
    let title = match &state.company_name {
        Some(name) => format!("Symbol · {}", name),
        None => "Symbol".to_string(),
    };
    let mut spans = vec![Span::raw(state.symbol.clone())];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }
    if state.symbol.is_empty() && !focused {
        spans = vec![secondary_span("e.g. IBM")];
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(focus_block(title, focused)),
        area,
    );
}

fn draw_series_selector(f: &mut Frame<'_>, area: Rect, view: &DashboardView, state: &QueryState) {
    let line = match state.time_series_function {
        Some(function) => Line::from(format!("◀ {} ▶", function.label())),
        None => Line::from(secondary_span("◀ choose a series ▶")),
    };
    f.render_widget(
        Paragraph::new(line).block(focus_block("Series", view.focus == Focus::Series)),
        area,
    );
}

fn draw_fetch_button(f: &mut Frame<'_>, area: Rect, state: &QueryState) {
    let style = if state.can_request_data() && !state.loading {
        selection_style()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    f.render_widget(
        Paragraph::new(Span::styled("Fetch", style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_suggestions(f: &mut Frame<'_>, area: Rect, view: &DashboardView, state: &QueryState) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = state
        .suggestions
        .iter()
        .map(|m| ListItem::new(truncate_to_width(&m.display_line(), width)))
        .collect();

    let title = if state.searching {
        "Suggestions (searching…)"
    } else {
        "Suggestions"
    };
    let list = List::new(items)
        .block(focus_block(title, view.focus == Focus::Suggestions))
        .highlight_style(selection_style())
        .highlight_symbol("› ");

    let mut list_state = ListState::default();
    if view.focus == Focus::Suggestions {
        list_state.select(Some(view.suggestion_cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn status_line(view: &DashboardView, state: &QueryState) -> Line<'static> {
    if let Some(notice) = &view.notice {
        return Line::from(Span::styled(notice.clone(), Style::default().fg(Color::Yellow)));
    }
    if state.loading {
        return Line::from(Span::styled("Loading…", Style::default().fg(ACCENT)));
    }
    if let Some(error) = &state.error {
        return Line::from(Span::styled(error.clone(), error_style()));
    }
    if state.searching && state.suggestions.is_empty() {
        return secondary_line("Searching symbols…");
    }

    let mut spans = Vec::new();
    if state.used_fallback {
        spans.push(Span::styled(
            "No data from the API; showing bundled sample data. ",
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(fetched_at) = &state.fetched_at {
        spans.push(secondary_span(format!("Updated {}", format_fetched_at(fetched_at))));
    }
    Line::from(spans)
}

fn draw_table(
    f: &mut Frame<'_>,
    area: Rect,
    view: &DashboardView,
    state: &QueryState,
    items_per_page: usize,
) {
    let focused = view.focus == Focus::Table;
    let Some(page) = state.table_page(items_per_page) else {
        f.render_widget(
            Paragraph::new(secondary_line(
                "Type a symbol, pick a series, then press Enter to fetch.",
            ))
            .block(focus_block("Data", focused)),
            area,
        );
        return;
    };

    let label = state
        .data
        .as_ref()
        .map(|data| data.function.label())
        .unwrap_or_default();
    let title = format!("{} · {}", state.title(), label);
    let table = build_table(
        page_rows(&page),
        header_row(&page.columns),
        page_widths(&page),
        title.clone(),
    );
    let table = if focused {
        table.block(focus_block(title, true))
    } else {
        table
    };
    f.render_widget(table, area);
}

fn page_window_line(state: &QueryState, items_per_page: usize) -> Line<'static> {
    let Some(page) = state.table_page(items_per_page) else {
        return Line::default();
    };
    if page.total_pages == 0 {
        return secondary_line("No rows");
    }

    let mut spans = vec![secondary_span(format!(
        "Page {}/{}  ",
        page.page, page.total_pages
    ))];
    if page.window.first().is_some_and(|&first| first > 1) {
        spans.push(secondary_span("… "));
    }
    for n in &page.window {
        if *n == page.page {
            spans.push(Span::styled(format!("[{}]", n), selection_style()));
        } else {
            spans.push(Span::raw(n.to_string()));
        }
        spans.push(Span::raw(" "));
    }
    if page.window.last().is_some_and(|&last| last < page.total_pages) {
        spans.push(secondary_span("…"));
    }
    Line::from(spans)
}

fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::Symbol => "Type a symbol • ↓ suggestions • Enter fetch • Tab next • Esc quit",
        Focus::Suggestions => "↑/↓ move • Enter pick • Esc dismiss",
        Focus::Series => "←/→ change series • Backspace clear • Enter fetch • Tab next • q quit",
        Focus::Table => "←/→ page • Home/End jump • r refresh • Tab next • q quit",
    }
}
