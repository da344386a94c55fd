use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::widgets::{Paragraph, Widget};

use super::block;
use crate::theme;

const TEXT: &str = r#"
Quit: q or <Ctrl+c>
Move Selection:
  - <Up / Down>: select position
Add Position:
  - a or /: open form
Edit Position:
  - e: load selected into form
Delete Position:
  - d: delete selected
Form:
  - <Up / Down>: select instrument
  - <Tab>: switch field
  - <Enter>: submit
  - <Escape>: cancel
"#;

pub const HELP_WIDTH: u16 = 38;
pub const HELP_HEIGHT: u16 = 18;

#[derive(Copy, Clone)]
pub struct HelpWidget {}

impl HelpWidget {
    pub fn get_rect(self, area: Rect) -> Rect {
        Rect {
            x: (area.width - HELP_WIDTH) / 2,
            y: (area.height - HELP_HEIGHT) / 2,
            width: HELP_WIDTH,
            height: HELP_HEIGHT,
        }
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(TEXT)
            .block(block::new(" Help "))
            .style(theme::style())
            .render(area, buf);
    }
}
