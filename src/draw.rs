use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::game_panel::{GamePanel, panel_height};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;

const HELP_TEXT: &str =
    " q quit  r reload  j/k focus  Enter/Space box score  PgUp/PgDn scroll  f full screen  \" logs ";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_header(f, layout.header, app);
        }

        draw_scoreboard(f, layout.main, app);

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("Failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, header: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let mut spans = vec![Span::styled(
        " NBA Scoreboard",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(updated) = app.state.scoreboard.last_updated {
        spans.push(Span::styled(
            format!("  Updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let title = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(title, header[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, header[1]);
}

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &mut App) {
    let mut block = default_border(Color::White).title(" Scoreboard ");
    if app.state.show_help {
        block = block.title_bottom(Line::styled(HELP_TEXT, Style::default().fg(Color::Gray)));
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut hits = Vec::new();

    if let Some(message) = app.state.scoreboard.message() {
        f.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        app.state.hits = hits;
        return;
    }

    let games = &app.state.scoreboard.games;
    let focused = app.state.scoreboard.focused;
    let heights: Vec<u16> = games
        .iter()
        .map(|game| panel_height(app.state.panels.panel(&game.id)))
        .collect();

    let bottom = inner.bottom();
    let mut y = inner.y;
    for (index, game) in games
        .iter()
        .enumerate()
        .skip(first_visible(&heights, focused, inner.height))
    {
        if y >= bottom {
            break;
        }
        let panel_area = Rect::new(inner.x, y, inner.width, heights[index].min(bottom - y));
        let widget = GamePanel {
            game,
            panel: app.state.panels.panel(&game.id),
            focused: index == focused,
        };
        hits.push(widget.hit(panel_area, index));
        f.render_widget(widget, panel_area);
        y += panel_area.height;
    }

    app.state.hits = hits;
}

/// Index of the first panel to draw so the focused one fits in `available`
/// rows. Panels above the focused one are kept while they still fit.
pub fn first_visible(heights: &[u16], focused: usize, available: u16) -> usize {
    let Some(last) = heights.len().checked_sub(1) else {
        return 0;
    };
    let focused = focused.min(last);
    let available = u32::from(available);

    let mut start = focused;
    let mut used = u32::from(heights[focused]);
    while start > 0 && used + u32::from(heights[start - 1]) <= available {
        start -= 1;
        used += u32::from(heights[start]);
    }
    start
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_fits_from_the_top() {
        assert_eq!(first_visible(&[4, 4, 4], 2, 20), 0);
        assert_eq!(first_visible(&[], 3, 20), 0);
    }

    #[test]
    fn focused_panel_is_kept_on_screen() {
        let heights = [4, 4, 22, 4, 4];
        assert_eq!(first_visible(&heights, 0, 12), 0);
        assert_eq!(first_visible(&heights, 1, 12), 0);
        // taller than the screen: start at the panel itself
        assert_eq!(first_visible(&heights, 2, 12), 2);
        assert_eq!(first_visible(&heights, 4, 12), 3);
        assert_eq!(first_visible(&heights, 9, 12), 3);
    }
}
