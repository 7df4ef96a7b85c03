//! Stateless UI rendering for the puzzle.

use crate::renderer::{PieceView, ViewState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tilitoli::TileId;

/// Renders the title, board and status line.
pub fn draw(frame: &mut Frame, view: &ViewState, status: &str) {
    let [title_area, board_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    let title = Paragraph::new("Tilitoli")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .centered();
    frame.render_widget(title, title_area);

    draw_board(frame, board_area, view);

    let status_style = if view.solved {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status_text = Paragraph::new(status)
        .style(status_style)
        .centered()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, status_area);
}

fn draw_board(frame: &mut Frame, area: Rect, view: &ViewState) {
    let (width, height) = view.board_extent();
    let origin = center_rect(area, width.saturating_add(2), height.saturating_add(2));
    frame.render_widget(Block::default().borders(Borders::ALL), origin);

    let inner = Rect::new(
        origin.x.saturating_add(1),
        origin.y.saturating_add(1),
        width,
        height,
    );
    for (id, piece) in &view.pieces {
        draw_piece(frame, inner, view, *id, piece);
    }
}

fn draw_piece(frame: &mut Frame, board: Rect, view: &ViewState, id: TileId, piece: &PieceView) {
    let placed = Rect::new(
        board.x.saturating_add(piece.area.x),
        board.y.saturating_add(piece.area.y),
        piece.area.width,
        piece.area.height,
    )
    .intersection(frame.area());
    if placed.is_empty() {
        return;
    }

    let label = Paragraph::new(id.to_string())
        .style(piece_style(view, piece))
        .centered();
    frame.render_widget(label, placed);
}

fn piece_style(view: &ViewState, piece: &PieceView) -> Style {
    // Shade by home cell so a solved board shows a checkerboard.
    let light = (piece.home.x() + piece.home.y()) % 2 == 0;
    let base = if light {
        Style::default().fg(Color::Black).bg(Color::LightBlue)
    } else {
        Style::default().fg(Color::White).bg(Color::Blue)
    };
    if view.solved || piece.position == piece.home {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Renderer;
    use ratatui::{Terminal, backend::TestBackend};
    use tilitoli::{Event, Listener, Position};

    fn rendered(view: &ViewState, status: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal.draw(|frame| draw(frame, view, status)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draws_tiles_and_status() {
        let renderer = Renderer::new(24);
        renderer
            .process_event(&Event::BoardCreated { size: 2 })
            .unwrap();
        for (id, (x, y)) in [(1, (0, 0)), (2, (1, 0)), (3, (0, 1))] {
            renderer
                .process_event(&Event::NewPieceCreated {
                    id,
                    position: Position::new(x, y),
                })
                .unwrap();
        }

        let screen = rendered(&renderer.view(), "Slide the tiles");

        assert!(screen.contains("Tilitoli"));
        assert!(screen.contains("Slide the tiles"));
        for label in ["1", "2", "3"] {
            assert!(screen.contains(label));
        }
    }

    #[test]
    fn test_empty_view_draws_without_panicking() {
        let screen = rendered(&ViewState::default(), "Waiting");
        assert!(screen.contains("Waiting"));
    }

    #[test]
    fn test_center_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(center_rect(area, 20, 20), area);
        assert_eq!(center_rect(area, 4, 2), Rect::new(3, 1, 4, 2));
    }
}
