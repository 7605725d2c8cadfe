use tui::layout::{Position, Rect};

/// Screen regions of one drawn panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelHit {
    /// Index of the game in the scoreboard.
    pub index: usize,
    pub area: Rect,
    pub toggle: Rect,
    /// Box score area, only while the panel is open.
    pub detail: Option<Rect>,
}

/// Which panel a left click toggles, if any. The toggle control is checked
/// before the rest of the panel so a click on it counts once. Clicks inside
/// an open box score do nothing.
pub fn resolve_click(hits: &[PanelHit], position: Position) -> Option<usize> {
    if let Some(hit) = hits.iter().find(|h| h.toggle.contains(position)) {
        return Some(hit.index);
    }

    hits.iter()
        .find(|h| h.area.contains(position) && !h.detail.is_some_and(|d| d.contains(position)))
        .map(|h| h.index)
}
