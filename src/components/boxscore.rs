use crate::boxscore::{COLUMNS, Fragment, NO_PLAYER_STATS_TEXT, PLAYER_LABEL, Row, TeamSection};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

const PLAYER_WIDTH: usize = 22;
const STAT_WIDTH: usize = 6;

/// Detail area of an open panel.
pub struct BoxScoreView<'a> {
    pub fragment: &'a Fragment,
    pub scroll: u16,
}

impl Widget for BoxScoreView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(fragment_lines(self.fragment))
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

pub fn fragment_lines(fragment: &Fragment) -> Vec<Line<'static>> {
    let Fragment::Teams(sections) = fragment else {
        let message = fragment.message().unwrap_or_default();
        return vec![Line::styled(message, Style::default().fg(Color::DarkGray))];
    };

    let mut lines = Vec::new();
    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::styled(
            section.team_name().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));

        match section {
            TeamSection::Empty { .. } => lines.push(Line::styled(
                NO_PLAYER_STATS_TEXT,
                Style::default().fg(Color::DarkGray),
            )),
            TeamSection::Table { rows, .. } => {
                lines.push(header_line());
                lines.extend(rows.iter().map(row_line));
            }
        }
    }
    lines
}

fn header_line() -> Line<'static> {
    let mut text = pad_name(PLAYER_LABEL);
    for column in COLUMNS {
        text.push_str(&format!("{:>STAT_WIDTH$}", column.label));
    }
    Line::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::UNDERLINED),
    )
}

fn row_line(row: &Row) -> Line<'static> {
    match row {
        Row::Played { name, cells } => {
            let mut text = pad_name(name);
            for cell in cells {
                text.push_str(&format!("{cell:>STAT_WIDTH$}"));
            }
            Line::from(text)
        }
        Row::DidNotPlay { name, reason } => Line::from(vec![
            Span::raw(pad_name(name)),
            Span::styled(
                reason.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
    }
}

fn pad_name(name: &str) -> String {
    let clipped: String = name.chars().take(PLAYER_WIDTH - 1).collect();
    format!("{clipped:<PLAYER_WIDTH$}")
}
