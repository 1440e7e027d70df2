//! Open/closed state for a click-to-open menu (user menu, language menu).

use ratatui::layout::Rect;

use crate::ui::util::hit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Toggled,
    /// Inside the open menu; the caller decides which item was picked.
    Inside,
    ClosedOutside,
    Ignored,
}

#[derive(Debug, Default, Clone)]
pub struct Dropdown {
    open: bool,
    button: Rect,
    container: Rect,
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Recorded at draw time so clicks are tested against what is on screen.
    pub fn set_areas(&mut self, button: Rect, container: Rect) {
        self.button = button;
        self.container = container;
    }

    pub fn button(&self) -> Rect {
        self.button
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn click(&mut self, column: u16, row: u16) -> Click {
        if hit(self.button, column, row) {
            self.toggle();
            return Click::Toggled;
        }
        if !self.open {
            return Click::Ignored;
        }
        if hit(self.container, column, row) {
            Click::Inside
        } else {
            self.open = false;
            Click::ClosedOutside
        }
    }

    /// Row index inside the container for an `Inside` click.
    pub fn item_at(&self, row: u16) -> Option<usize> {
        let body = crate::ui::util::inner(self.container);
        if row >= body.y && row < body.y + body.height {
            Some((row - body.y) as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Dropdown {
        let mut d = Dropdown::default();
        d.set_areas(Rect::new(50, 0, 10, 1), Rect::new(45, 1, 15, 6));
        d
    }

    #[test]
    fn button_click_toggles() {
        let mut d = menu();
        assert_eq!(d.click(52, 0), Click::Toggled);
        assert!(d.is_open());
        assert_eq!(d.click(52, 0), Click::Toggled);
        assert!(!d.is_open());
    }

    #[test]
    fn outside_click_closes_open_menu() {
        let mut d = menu();
        d.click(52, 0);
        assert_eq!(d.click(46, 3), Click::Inside);
        assert!(d.is_open());
        assert_eq!(d.click(0, 20), Click::ClosedOutside);
        assert!(!d.is_open());
        assert_eq!(d.click(0, 20), Click::Ignored);
    }

    #[test]
    fn items_are_counted_inside_the_border() {
        let d = menu();
        assert_eq!(d.item_at(1), None);
        assert_eq!(d.item_at(2), Some(0));
        assert_eq!(d.item_at(5), Some(3));
        assert_eq!(d.item_at(6), None);
    }
}
