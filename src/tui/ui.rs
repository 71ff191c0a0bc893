//! Stateless UI rendering for Quarto.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Focus, LoadState};
use crate::model::{self, Cell, GameState, Piece, BOARD_SIZE};
use crate::orchestrator::{Staging, TurnOrchestrator};

const HELP: &str =
    "arrows move  Tab board/tray  Enter select  p play  t retry  r reset  q quit";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    match app.load() {
        LoadState::Loading => draw_loading(frame),
        LoadState::Failed(reason) => draw_failure(frame, reason),
        LoadState::Ready(orchestrator) => draw_game(frame, app, orchestrator),
    }
}

fn draw_loading(frame: &mut Frame) {
    let area = center_rect(frame.area(), 40, 5);
    let text = Paragraph::new("Loading engine...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().title("Strictly Quarto").borders(Borders::ALL));
    frame.render_widget(text, area);
}

fn draw_failure(frame: &mut Frame, reason: &str) {
    let area = center_rect(frame.area(), 60, 9);
    let lines = vec![
        Line::from(Span::styled(
            "The game engine could not be loaded.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(reason.to_string()),
        Line::from(""),
        Line::from("Press q to quit."),
    ];
    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().title("Error").borders(Borders::ALL));
    frame.render_widget(text, area);
}

fn draw_game(frame: &mut Frame, app: &App, orchestrator: &TurnOrchestrator) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Board and tray
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Strictly Quarto")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let staging = orchestrator.staging().copied().unwrap_or_default();
    draw_board(frame, middle[0], app, orchestrator, &staging);
    draw_side(frame, middle[1], app, orchestrator.state(), &staging);

    let mut status = vec![Line::from(app.status_line())];
    if let Some(notice) = app.notice() {
        status.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Magenta),
        )));
    }
    let status = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    orchestrator: &TurnOrchestrator,
    staging: &Staging,
) {
    let cells = Cell::all().collect::<Vec<_>>();
    let mut lines = Vec::with_capacity(BOARD_SIZE * 2);
    for row in cells.chunks(BOARD_SIZE) {
        let spans = row
            .iter()
            .map(|&cell| cell_span(cell, app, orchestrator, staging))
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Board").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn cell_span(
    cell: Cell,
    app: &App,
    orchestrator: &TurnOrchestrator,
    staging: &Staging,
) -> Span<'static> {
    let (text, mut style) = match orchestrator.state().board().get(cell) {
        Some(piece) => (format!(" {} ", glyph(piece)), piece_style(piece)),
        None => (" ·  ".to_string(), Style::default().fg(Color::DarkGray)),
    };
    if orchestrator.last_placed() == Some(cell) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if staging.cell == Some(cell) {
        style = style.bg(Color::Green);
    }
    if app.focus() == Focus::Board && app.board_cursor() == cell {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(text, style)
}

fn draw_side(frame: &mut Frame, area: Rect, app: &App, state: &GameState, staging: &Staging) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(area);

    let in_hand = match state.selected_piece() {
        Some(piece) => Line::from(vec![
            Span::raw("In hand: "),
            Span::styled(glyph(*piece), piece_style(*piece)),
        ]),
        None => Line::from("In hand: nothing"),
    };
    frame.render_widget(
        Paragraph::new(in_hand).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let mut lines = Vec::new();
    for (row, pieces) in state.available_pieces().chunks(BOARD_SIZE).enumerate() {
        let spans = pieces
            .iter()
            .enumerate()
            .map(|(offset, piece)| {
                let index = row * BOARD_SIZE + offset;
                let mut style = piece_style(*piece);
                if staging.piece_index == Some(index) {
                    style = style.bg(Color::Green);
                }
                if app.focus() == Focus::Tray && app.tray_cursor() == index {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Span::styled(format!(" {:>2}:{} ", index, glyph(*piece)), style)
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }
    if lines.is_empty() {
        lines.push(Line::from("No pieces left to hand off"));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Pieces for the computer").borders(Borders::ALL));
    frame.render_widget(paragraph, chunks[1]);
}

/// Two-character picture of a piece: outline for shape and fill, then height.
fn glyph(piece: Piece) -> String {
    let body = match (piece.shape(), piece.surface()) {
        (model::Shape::Square, model::Surface::Solid) => '■',
        (model::Shape::Square, model::Surface::Hollow) => '□',
        (model::Shape::Round, model::Surface::Solid) => '●',
        (model::Shape::Round, model::Surface::Hollow) => '○',
    };
    let height = match piece.height() {
        model::Height::Tall => '▲',
        model::Height::Short => '▽',
    };
    format!("{}{}", body, height)
}

fn piece_style(piece: Piece) -> Style {
    let color = match piece.color() {
        model::Color::Blue => Color::LightBlue,
        model::Color::Brown => Color::Rgb(181, 101, 29),
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
