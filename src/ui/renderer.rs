// ============================================
// src/ui/renderer.rs
// Draws the App onto a ratatui frame
// ============================================

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::app::{App, Phase};
use crate::fireworks::plan::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::fireworks::CELEBRATION_LENGTH;
use crate::ui::board::{Board, Mark, MAX_ENTRY_DIGITS};

const BACKGROUND: Color = Color::Rgb(0x2a, 0x2a, 0x2a);
const LIGHT_GREEN: Color = Color::Rgb(0x90, 0xEE, 0x90);
const LIGHT_RED: Color = Color::Rgb(0xFF, 0xB6, 0xC1);

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ✈️ AIRSPEEDS QUIZ ✈️ ")
        .title_alignment(ratatui::layout::Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [instructions, list, status] = Layout::vertical([
        Constraint::Length(3), // instructions + spacer
        Constraint::Min(1),    // entries
        Constraint::Length(1), // status bar
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from("Enter the airspeed for each V-speed and press Enter"),
            Line::from("Wrong answer resets the quiz!").style(Style::default().fg(Color::Yellow)),
        ])
        .centered(),
        instructions,
    );

    frame.render_widget(Paragraph::new(entry_lines(app.board())), list);
    frame.render_widget(status_line(app), status);

    if app.overlay().is_visible() {
        render_fireworks(frame, app, area);
    }
    if app.board().is_prompt_visible() {
        render_completion_prompt(frame, area);
    }
}

fn entry_lines(board: &Board) -> Vec<Line<'_>> {
    board
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let focused = board.focused() == Some(i);

            let box_style = match entry.mark {
                Mark::Correct => Style::default().fg(Color::Black).bg(LIGHT_GREEN),
                Mark::Incorrect => Style::default().fg(Color::Black).bg(LIGHT_RED),
                Mark::Pending if focused => Style::default().fg(Color::Black).bg(Color::White),
                Mark::Pending => Style::default().fg(Color::Gray).bg(Color::DarkGray),
            };
            let cursor = if focused { "_" } else { " " };
            let text = format!(" {:^width$}{} ", entry.text, cursor, width = MAX_ENTRY_DIGITS);

            let tick = match entry.mark {
                Mark::Correct => Span::styled(" ✓", Style::default().fg(LIGHT_GREEN).bold()),
                _ => Span::raw("  "),
            };

            Line::from(vec![
                Span::styled(format!("{:>8}: ", entry.label), Style::default().fg(Color::White).bold()),
                Span::styled(text, box_style),
                tick,
                Span::styled(format!("  {}", entry.meaning), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect()
}

fn status_line(app: &App) -> Paragraph<'_> {
    let stats = app.stats();
    let round = app.round();
    let state = match app.phase() {
        Phase::Answering => format!("{} / {}", round.cursor(), round.len()),
        Phase::Flashing => "Wrong! Reshuffling...".to_string(),
        Phase::Celebrating => "Perfect!".to_string(),
        Phase::Completed => "Press any key".to_string(),
    };
    Paragraph::new(format!(
        "{}  |  Round {}  Perfect {}  Best {}  Misses {}  |  Esc to quit",
        state,
        stats.rounds_started,
        stats.perfect_rounds,
        stats.best_progress,
        stats.mistakes()
    ))
    .style(Style::default().fg(Color::Yellow))
}

fn render_fireworks(frame: &mut Frame, app: &App, area: Rect) {
    let remaining = app
        .animator()
        .started_at()
        .map(|started| CELEBRATION_LENGTH.saturating_sub(started.elapsed()).as_secs())
        .unwrap_or(0);

    let overlay = app.overlay();
    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" 🎆 {}s ", remaining)),
        )
        .background_color(BACKGROUND)
        .marker(Marker::Braille)
        .x_bounds([0.0, CANVAS_WIDTH])
        .y_bounds([0.0, CANVAS_HEIGHT])
        .paint(|ctx| {
            for (pos, color) in overlay.points() {
                // Canvas y grows upward, ours grows downward.
                let coords = [(pos.x, CANVAS_HEIGHT - pos.y)];
                ctx.draw(&Points { coords: &coords, color });
            }
        });

    frame.render_widget(Clear, area);
    frame.render_widget(canvas, area);
}

fn render_completion_prompt(frame: &mut Frame, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(4)]).flex(Flex::Center).areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(36)]).flex(Flex::Center).areas(row);

    let prompt = Paragraph::new(vec![
        Line::from("🎉 PERFECT SCORE! 🎉").style(Style::default().fg(LIGHT_GREEN).add_modifier(Modifier::BOLD)),
        Line::from("Press any key to start again"),
    ])
    .centered()
    .block(Block::default().borders(Borders::ALL).style(Style::default().bg(BACKGROUND)));

    frame.render_widget(Clear, popup);
    frame.render_widget(prompt, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{SpeedTable, V_SPEEDS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn draws_every_label() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let app = App::new(SpeedTable::new(V_SPEEDS).unwrap(), StdRng::seed_from_u64(1), tx);

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("AIRSPEEDS QUIZ"));
        for term in V_SPEEDS {
            assert!(text.contains(&format!("{}:", term.label)), "missing {}", term.label);
        }
        assert!(text.contains("0 / 18"));
    }
}
