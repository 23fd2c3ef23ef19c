//! Farmer applications screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::loader::{LoadState, Tracked};
use crate::models::{display_date, Application};
use crate::tui::ui::{truncate_string, InputField, Styles};

/// Applications screen state
pub struct ApplicationsScreen {
    pub farmer_id_input: InputField,
    pub applications: Tracked<Vec<Application>>,
    pub list_state: ListState,
    pub has_attempted: bool,
}

impl ApplicationsScreen {
    pub fn new() -> Self {
        let mut farmer_id_input =
            InputField::new("Farmer ID").with_placeholder("e.g., FARM-9 (Enter to load)");
        farmer_id_input.set_focus(true);

        Self {
            farmer_id_input,
            applications: Tracked::new(),
            list_state: ListState::default(),
            has_attempted: false,
        }
    }

    /// Pre-fill the farmer id, used when jumping over from the dossier screen.
    pub fn set_farmer_id(&mut self, farmer_id: &str) {
        self.farmer_id_input.clear();
        for c in farmer_id.chars() {
            self.farmer_id_input.insert_char(c);
        }
    }

    fn loaded_applications(&self) -> &[Application] {
        self.applications
            .state()
            .ready()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn reset_selection(&mut self) {
        self.list_state.select(if self.loaded_applications().is_empty() {
            None
        } else {
            Some(0)
        });
    }

    pub fn navigate_up(&mut self) {
        let selected = self.list_state.selected().unwrap_or(0);
        if selected > 0 {
            self.list_state.select(Some(selected - 1));
        }
    }

    pub fn navigate_down(&mut self) {
        let count = self.loaded_applications().len();
        if count == 0 {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        if selected + 1 < count {
            self.list_state.select(Some(selected + 1));
        }
    }

    /// Draw the applications screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Farmer id input
                Constraint::Min(0),    // Applications table
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        self.farmer_id_input.render(f, chunks[0]);
        self.draw_table(f, chunks[1]);
        self.draw_instructions(f, chunks[2]);
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Applications")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        if !self.has_attempted {
            let widget = Paragraph::new("Enter a farmer id above and press Enter.")
                .style(Styles::inactive())
                .block(block);
            f.render_widget(widget, area);
            return;
        }

        match self.applications.state() {
            LoadState::Pending => {
                let widget = Paragraph::new("Loading applications...")
                    .style(Styles::info())
                    .block(block);
                f.render_widget(widget, area);
            }
            LoadState::Failed(message) => {
                let widget = Paragraph::new(message.as_str())
                    .style(Styles::error())
                    .block(block);
                f.render_widget(widget, area);
            }
            LoadState::Ready(applications) => {
                if applications.is_empty() {
                    let widget = Paragraph::new("No applications found for this farmer.")
                        .style(Styles::inactive())
                        .block(block);
                    f.render_widget(widget, area);
                    return;
                }

                let header = ListItem::new(Line::from(vec![
                    Span::styled("Application ID            ", Styles::title()),
                    Span::styled("│ Status     ", Styles::title()),
                    Span::styled("│ Created At", Styles::title()),
                ]));

                let selected = self.list_state.selected();
                let items: Vec<ListItem> = std::iter::once(header)
                    .chain(applications.iter().enumerate().map(|(i, app)| {
                        let style = if Some(i) == selected {
                            Styles::selected()
                        } else {
                            status_style(&app.status)
                        };

                        let content = format!(
                            "{} │ {} │ {}",
                            truncate_string(&app.id, 25),
                            truncate_string(&app.status, 10),
                            display_date(app.created_at.as_deref())
                        );

                        ListItem::new(Line::from(Span::styled(content, style)))
                    }))
                    .collect();

                let list = List::new(items).block(block);
                f.render_stateful_widget(list, area, &mut self.list_state);
            }
        }
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let widget =
            Paragraph::new("Type id + Enter: Load | ↑/↓: Navigate | ESC: Back")
                .style(Styles::info())
                .block(
                    Block::default()
                        .title("Instructions")
                        .borders(Borders::ALL)
                        .border_style(Styles::inactive_border()),
                );
        f.render_widget(widget, area);
    }
}

fn status_style(status: &str) -> Style {
    match status {
        "Approved" => Styles::success(),
        "Rejected" => Styles::error(),
        _ => Styles::warning(),
    }
}
