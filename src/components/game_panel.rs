use crate::components::boxscore::{BoxScoreView, fragment_lines};
use crate::mouse::PanelHit;
use crate::state::panels::{Panel, PanelState};
use nba_api::{Game, Side, Team};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Borders plus the summary, actions and logo rows.
pub const CLOSED_HEIGHT: u16 = 5;
const DETAIL_OFFSET: u16 = 3;
pub const MAX_DETAIL_ROWS: u16 = 18;

const NAME_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreClass {
    Plain,
    WinLeft,
    WinRight,
}

impl ScoreClass {
    fn style(self) -> Style {
        match self {
            ScoreClass::Plain => Style::default().fg(Color::White),
            ScoreClass::WinLeft | ScoreClass::WinRight => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Plain,
    Live,
}

impl StatusClass {
    fn style(self) -> Style {
        match self {
            StatusClass::Plain => Style::default().fg(Color::Gray),
            StatusClass::Live => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryClasses {
    pub away_score: ScoreClass,
    pub home_score: ScoreClass,
    pub status: StatusClass,
}

/// Highlights for a summary row: the winner's score once a game is final,
/// and the status while it is in progress.
pub fn summary_classes(game: &Game) -> SummaryClasses {
    let winner = game.winner();
    SummaryClasses {
        away_score: if winner == Some(Side::Away) {
            ScoreClass::WinLeft
        } else {
            ScoreClass::Plain
        },
        home_score: if winner == Some(Side::Home) {
            ScoreClass::WinRight
        } else {
            ScoreClass::Plain
        },
        status: if game.is_live() {
            StatusClass::Live
        } else {
            StatusClass::Plain
        },
    }
}

pub fn panel_height(panel: Option<&Panel>) -> u16 {
    match panel.filter(|p| p.is_open()) {
        Some(panel) => {
            let rows = fragment_lines(&panel.content).len().min(MAX_DETAIL_ROWS as usize) as u16;
            CLOSED_HEIGHT + rows.max(1)
        }
        None => CLOSED_HEIGHT,
    }
}

/// One game: summary row, toggle + link row, logo row, and the box score when open.
pub struct GamePanel<'a> {
    pub game: &'a Game,
    pub panel: Option<&'a Panel>,
    pub focused: bool,
}

struct Regions {
    summary: Rect,
    actions: Rect,
    logos: Rect,
    toggle: Rect,
    detail: Option<Rect>,
}

impl GamePanel<'_> {
    fn state(&self) -> PanelState {
        self.panel.map(|p| p.state).unwrap_or_default()
    }

    fn toggle_text(&self) -> String {
        format!("[{}]", self.state().toggle_label())
    }

    fn block(&self) -> Block<'static> {
        let color = if self.focused {
            Color::Yellow
        } else if self.state() == PanelState::Open {
            Color::White
        } else {
            Color::DarkGray
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(format!(" {} @ {} ", self.game.away.short, self.game.home.short))
    }

    fn regions(&self, area: Rect) -> Regions {
        let inner = self.block().inner(area);
        let row = |offset: u16| {
            if offset < inner.height {
                Rect::new(inner.x, inner.y + offset, inner.width, 1)
            } else {
                Rect::new(inner.x, inner.y, 0, 0)
            }
        };

        let actions = row(1);
        let toggle_width = (self.toggle_text().chars().count() as u16).min(actions.width);
        let detail = (self.state() == PanelState::Open && inner.height > DETAIL_OFFSET).then(|| {
            Rect::new(
                inner.x,
                inner.y + DETAIL_OFFSET,
                inner.width,
                inner.height - DETAIL_OFFSET,
            )
        });

        Regions {
            summary: row(0),
            actions,
            logos: row(2),
            toggle: Rect::new(actions.x, actions.y, toggle_width, actions.height),
            detail,
        }
    }

    pub fn hit(&self, area: Rect, index: usize) -> PanelHit {
        let regions = self.regions(area);
        PanelHit {
            index,
            area,
            toggle: regions.toggle,
            detail: regions.detail,
        }
    }
}

impl Widget for GamePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let regions = self.regions(area);
        self.block().render(area, buf);

        let classes = summary_classes(self.game);
        let away = &self.game.away;
        let home = &self.game.home;
        let summary = Line::from(vec![
            Span::styled(format!("{:<4}", away.short), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(team_name(away)),
            Span::styled(format!("{:>4}", away.score), classes.away_score.style()),
            Span::raw(" - "),
            Span::styled(format!("{:<4}", home.score), classes.home_score.style()),
            Span::styled(format!("{:<4}", home.short), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(team_name(home)),
            Span::styled(self.game.status_text.clone(), classes.status.style()),
        ]);
        Paragraph::new(summary).render(regions.summary, buf);

        let link_style = Style::default().fg(Color::DarkGray);
        let actions = Line::from(vec![
            Span::styled(
                self.toggle_text(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ESPN ↗ ", link_style),
            Span::styled(
                self.game.game_link.clone(),
                link_style.add_modifier(Modifier::UNDERLINED),
            ),
        ]);
        Paragraph::new(actions).render(regions.actions, buf);
        Paragraph::new(logo_line(away, home)).render(regions.logos, buf);

        if let (Some(detail), Some(panel)) = (regions.detail, self.panel) {
            BoxScoreView {
                fragment: &panel.content,
                scroll: panel.scroll,
            }
            .render(detail, buf);
        }
    }
}

/// Terminals cannot draw the crests, so their URLs are listed instead.
fn logo_line(away: &Team, home: &Team) -> Line<'static> {
    let style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    for team in [away, home].into_iter().filter(|t| !t.logo.is_empty()) {
        if spans.is_empty() {
            spans.push(Span::styled("Logos ", style));
        } else {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("{} ", team.short), style));
        spans.push(Span::styled(
            team.logo.clone(),
            style.add_modifier(Modifier::UNDERLINED),
        ));
    }
    Line::from(spans)
}

fn team_name(team: &Team) -> String {
    let clipped: String = team.name.chars().take(NAME_WIDTH - 1).collect();
    format!("{clipped:<NAME_WIDTH$}")
}
