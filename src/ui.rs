//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  This makes it easy to change the
//! visual layout without touching business logic.
//!
//! ## For contributors
//!
//! * The layout is a topics sidebar on the left and the card grid on the
//!   right, with a pagination bar under the grid and a one-line status bar
//!   along the bottom.
//! * The grid only ever renders [`Pager::current_window`]; it never indexes
//!   the full collection.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.
//!
//! [`Pager::current_window`]: crate::pager::Pager::current_window

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FeedStatus, Focus};
use crate::source::Article;

const TOPICS_WIDTH: u16 = 22;
/// Smallest card that still shows a bordered title line.
const CARD_MIN_HEIGHT: u16 = 3;
const CARD_MIN_WIDTH: u16 = 12;
const FG: Color = Color::White;
const MUTED: Color = Color::DarkGray;
const ACCENT: Color = Color::Magenta;

/// Draw the complete UI for one frame.
///
/// Called once per tick from the main loop.  Delegates to helper functions
/// for each screen region.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [body_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [topics_area, news_area] = Layout::horizontal([
        Constraint::Length(TOPICS_WIDTH),
        Constraint::Min(1),
    ])
    .areas(body_area);

    let [grid_area, pager_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(news_area);

    draw_topics(app, frame, topics_area);
    draw_grid(app, frame, grid_area);
    draw_pagination(app, frame, pager_area);
    draw_status_bar(app, frame, status_area);

    if app.detail_open {
        draw_detail(app, frame, grid_area);
    }
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Render the topics sidebar.  The active topic is marked with `●`.
fn draw_topics(app: &mut App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .topics
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let marker = if app.active_topic == Some(i) { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::styled(topic.as_str(), Style::default().fg(FG)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Topics ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(focus_border(app.focus == Focus::Topics)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸");

    frame.render_stateful_widget(list, area, &mut app.topic_state);
}

/// Render the current page as a grid of cards, or a notice when there is
/// nothing to show.
fn draw_grid(app: &App, frame: &mut Frame, area: Rect) {
    if app.pager.is_empty() {
        let (text, color) = match &app.feed {
            FeedStatus::Loading => ("Loading…".to_string(), Color::Yellow),
            FeedStatus::Ready => ("No articles for this topic".to_string(), MUTED),
            FeedStatus::Unavailable(reason) => {
                (format!("No content available\n\n{reason}"), Color::Red)
            }
        };
        let notice = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        frame.render_widget(notice, area);
        return;
    }

    // Lay out only the cards on this page, and no more rows or columns than
    // the area can show at a readable size.  Cards past that are skipped.
    let window = app.pager.current_window();
    let columns = app.columns;
    let rows = window.len().div_ceil(columns);
    let visible_rows = rows.min(usize::from((area.height / CARD_MIN_HEIGHT).max(1)));
    let visible_cols = columns.min(usize::from((area.width / CARD_MIN_WIDTH).max(1)));

    let row_areas =
        Layout::vertical(vec![Constraint::Ratio(1, visible_rows as u32); visible_rows]).split(area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells =
            Layout::horizontal(vec![Constraint::Ratio(1, visible_cols as u32); visible_cols])
                .split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let i = row * columns + col;
            let Some(article) = window.get(i) else {
                break;
            };
            let selected = app.focus == Focus::Grid && app.selected_card == i;
            draw_card(article, selected, frame, *cell);
        }
    }
}

fn draw_card(article: &Article, selected: bool, frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            article.title.as_str(),
            Style::default().fg(FG).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(article.description.as_str(), Style::default().fg(FG))),
        Line::from(Span::styled(
            article.preview(),
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            format!("📰 {}", article.source_name),
            Style::default().fg(ACCENT),
        )),
    ];

    let border = if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };

    let card = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border),
    );
    frame.render_widget(card, area);
}

/// Render `◀ Previous  Page X of Y  Next ▶`, dimming unavailable buttons.
fn draw_pagination(app: &App, frame: &mut Frame, area: Rect) {
    let button = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(FG).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        Span::styled(label, style)
    };

    let (page, total) = app.pager.page_label();
    let bar = Paragraph::new(Line::from(vec![
        button("◀ Previous", app.pager.can_go_previous()),
        Span::raw("   "),
        Span::styled(format!("Page {page} of {total}"), Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        button("Next ▶", app.pager.can_go_next()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(bar, area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw(if app.is_fetching() { " ⟳ " } else { "  " }),
        Span::styled(
            format!("{} articles", app.pager.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", app.source_name()), Style::default().fg(Color::Cyan)),
        Span::raw("  q: quit  Tab: focus  n/p: page  Enter: open  r: refresh"),
    ]));
    frame.render_widget(status, area);
}

/// Render the selected article full-size over the grid.
fn draw_detail(app: &App, frame: &mut Frame, area: Rect) {
    let Some(article) = app.selected_article() else {
        return;
    };

    let popup = centered(area, 90, 90);

    let mut meta = vec![Span::styled(
        format!("📰 {}", article.source_name),
        Style::default().fg(ACCENT),
    )];
    if let Some(published) = article.published {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(
            published.format("%Y-%m-%d %H:%M").to_string(),
            Style::default().fg(MUTED),
        ));
    }

    let mut text = vec![
        Line::from(meta),
        Line::default(),
        Line::from(Span::styled(
            article.description.as_str(),
            Style::default().fg(FG).add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled(article.body.as_str(), Style::default().fg(FG))),
    ];
    if let Some(link) = &article.link {
        text.push(Line::default());
        text.push(Line::from(Span::styled(link.as_str(), Style::default().fg(Color::Blue))));
    }

    let detail = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" {} ", article.title))
            .title_bottom(Line::from(" Esc: close ").alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(detail, popup);
}

/// A rectangle `pct_x`% by `pct_y`% of `area`, centred in it.
fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - pct_y) / 2),
        Constraint::Percentage(pct_y),
        Constraint::Percentage((100 - pct_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - pct_x) / 2),
        Constraint::Percentage(pct_x),
        Constraint::Percentage((100 - pct_x) / 2),
    ])
    .areas(middle);
    center
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
