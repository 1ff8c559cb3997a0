use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::constants::{DROP_ZONE_HEIGHT, PICKER_WIDTH, STATUS_HEIGHT};

/// Screen regions, computed per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub picker: Rect,
    pub drop_zone: Rect,
    pub status: Rect,
    pub help: Rect,
}

pub fn split(area: Rect) -> AppLayout {
    let [body, help] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .areas(area);

    let [picker, right] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PICKER_WIDTH), Constraint::Min(0)])
        .areas(body);

    let [drop_zone, status, _rest] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DROP_ZONE_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(right);

    AppLayout {
        picker,
        drop_zone,
        status,
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_fit_inside_area_without_overlap() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = split(area);

        assert_eq!(layout.picker.width, PICKER_WIDTH);
        assert_eq!(layout.help.height, 1);
        assert_eq!(layout.help.y, 29);
        assert_eq!(layout.drop_zone.x, PICKER_WIDTH);
        assert_eq!(layout.status.y, layout.drop_zone.bottom());
        assert!(layout.picker.intersection(layout.drop_zone).is_empty());
    }
}
