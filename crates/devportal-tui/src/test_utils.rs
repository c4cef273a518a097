//! Test utilities for widget and view rendering

use std::sync::Arc;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};

use devportal_app::{AppState, Route, Settings};
use devportal_client::test_utils::test_record;

/// A terminal backed by an in-memory buffer
pub struct TestTerminal {
    terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// 80x24 terminal
    pub fn new() -> Self {
        Self::with_size(80, 24)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.backend().buffer().area;
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("draw widget");
    }

    pub fn draw(&mut self, f: impl FnOnce(&mut Frame)) {
        self.terminal.draw(f).expect("draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Buffer text, one line per row, trailing spaces trimmed
    pub fn content(&self) -> String {
        let buffer = self.buffer();
        let area = buffer.area;
        let mut lines = Vec::with_capacity(area.height as usize);
        for y in area.y..area.y + area.height {
            let mut line = String::new();
            for x in area.x..area.x + area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }

    /// The row containing `text`, if any
    pub fn line_containing(&self, text: &str) -> Option<String> {
        self.content()
            .lines()
            .find(|line| line.contains(text))
            .map(str::to_string)
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Authenticated state with a loaded record for device `SN-1`
pub fn device_state() -> AppState {
    let mut state = AppState::new(Route::Device("SN-1".into()), Settings::default());
    state.session.authenticate("0501234567");
    state.set_record(Arc::new(test_record("SN-1")));
    state
}
