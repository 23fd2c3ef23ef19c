//! FPO directory screen: tri-state listing with a detail modal
//!
//! The modal is a pure local projection of the already-fetched row; opening
//! it never issues a network call.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::loader::{LoadState, Tracked};
use crate::models::{display_date, display_or_na, display_yes_no, Fpo};
use crate::tui::ui::{centered_rect, truncate_string, Styles};

/// FPO directory screen state
pub struct FpoListScreen {
    pub fpos: Tracked<Vec<Fpo>>,
    pub list_state: ListState,
    pub skip: usize,
    pub limit: usize,
    pub show_detail: bool,
    pub detail_scroll: u16,
    pub loaded_once: bool,
}

impl FpoListScreen {
    pub fn new(limit: usize) -> Self {
        Self {
            fpos: Tracked::new(),
            list_state: ListState::default(),
            skip: 0,
            limit,
            show_detail: false,
            detail_scroll: 0,
            loaded_once: false,
        }
    }

    fn loaded_fpos(&self) -> &[Fpo] {
        self.fpos.state().ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn reset_selection(&mut self) {
        self.show_detail = false;
        self.detail_scroll = 0;
        self.list_state.select(if self.loaded_fpos().is_empty() {
            None
        } else {
            Some(0)
        });
    }

    pub fn navigate_up(&mut self) {
        let count = self.loaded_fpos().len();
        if count == 0 {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        if selected > 0 {
            self.list_state.select(Some(selected - 1));
        }
    }

    pub fn navigate_down(&mut self) {
        let count = self.loaded_fpos().len();
        if count == 0 {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        if selected + 1 < count {
            self.list_state.select(Some(selected + 1));
        }
    }

    /// Selecting is a local projection over the fetched page.
    pub fn selected_fpo(&self) -> Option<&Fpo> {
        self.list_state
            .selected()
            .and_then(|i| self.loaded_fpos().get(i))
    }

    pub fn open_detail(&mut self) {
        if self.selected_fpo().is_some() {
            self.show_detail = true;
            self.detail_scroll = 0;
        }
    }

    pub fn close_detail(&mut self) {
        self.show_detail = false;
    }

    pub fn next_page(&mut self) {
        self.skip += self.limit;
    }

    pub fn previous_page(&mut self) {
        self.skip = self.skip.saturating_sub(self.limit);
    }

    /// Draw the FPO directory screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // List
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_list(f, chunks[1]);
        self.draw_instructions(f, chunks[2]);

        if self.show_detail {
            self.draw_detail_modal(f, area);
        }
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let title_text = match self.fpos.state() {
            LoadState::Pending => format!("FPO Directory - loading (skip={})...", self.skip),
            LoadState::Ready(fpos) => format!(
                "FPO Directory - {} records (skip={}, limit={})",
                fpos.len(),
                self.skip,
                self.limit
            ),
            LoadState::Failed(_) => "FPO Directory - load failed".to_string(),
        };

        let title = Paragraph::new(title_text)
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_list(&mut self, f: &mut Frame, area: Rect) {
        match self.fpos.state() {
            LoadState::Pending => {
                let widget = Paragraph::new("Loading FPO directory...")
                    .style(Styles::info())
                    .block(
                        Block::default()
                            .title("FPOs")
                            .borders(Borders::ALL)
                            .border_style(Styles::inactive_border()),
                    );
                f.render_widget(widget, area);
            }
            LoadState::Failed(message) => {
                let widget = Paragraph::new(message.as_str())
                    .style(Styles::error())
                    .block(
                        Block::default()
                            .title("FPOs")
                            .borders(Borders::ALL)
                            .border_style(Styles::inactive_border()),
                    );
                f.render_widget(widget, area);
            }
            LoadState::Ready(fpos) => {
                if fpos.is_empty() {
                    let widget = Paragraph::new("No FPOs on this page.")
                        .style(Styles::inactive())
                        .block(
                            Block::default()
                                .title("FPOs")
                                .borders(Borders::ALL)
                                .border_style(Styles::inactive_border()),
                        );
                    f.render_widget(widget, area);
                    return;
                }

                let header = ListItem::new(Line::from(vec![
                    Span::styled("FPO ID      ", Styles::title()),
                    Span::styled("│ Entity Name              ", Styles::title()),
                    Span::styled("│ District        ", Styles::title()),
                    Span::styled("│ Farmers ", Styles::title()),
                    Span::styled("│ Active", Styles::title()),
                ]));

                let selected = self.list_state.selected();
                let items: Vec<ListItem> = std::iter::once(header)
                    .chain(fpos.iter().enumerate().map(|(i, fpo)| {
                        let style = if Some(i) == selected {
                            Styles::selected()
                        } else {
                            Style::default()
                        };

                        let farmers = fpo
                            .no_of_farmers
                            .map(|n| n.to_string())
                            .unwrap_or_else(|| "N/A".to_string());

                        let content = format!(
                            "{} │ {} │ {} │ {:>7} │ {}",
                            truncate_string(&fpo.fpo_id, 11),
                            truncate_string(&fpo.entity_name, 24),
                            truncate_string(&display_or_na(fpo.district.as_deref()), 15),
                            farmers,
                            display_yes_no(fpo.active)
                        );

                        ListItem::new(Line::from(Span::styled(content, style)))
                    }))
                    .collect();

                let list = List::new(items).block(
                    Block::default()
                        .title("FPOs")
                        .borders(Borders::ALL)
                        .border_style(Styles::active_border()),
                );

                f.render_stateful_widget(list, area, &mut self.list_state);
            }
        }
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let widget = Paragraph::new(
            "↑/↓: Navigate | Enter: Details | ←/→: Pages | r: Refresh | ESC: Back",
        )
        .style(Styles::info())
        .block(
            Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(widget, area);
    }

    fn draw_detail_modal(&self, f: &mut Frame, area: Rect) {
        let Some(fpo) = self.selected_fpo() else {
            return;
        };

        let popup_area = centered_rect(80, 80, area);

        let lines = detail_lines(fpo);
        let widget = Paragraph::new(lines)
            .scroll((self.detail_scroll, 0))
            .block(
                Block::default()
                    .title(format!("FPO Details - {}", fpo.entity_name))
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            );

        f.render_widget(Clear, popup_area);
        f.render_widget(widget, popup_area);
    }
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<22}", label), Styles::info()),
        Span::raw(value),
    ])
}

fn detail_lines(fpo: &Fpo) -> Vec<Line<'static>> {
    let mut lines = vec![
        field_line("FPO ID:", fpo.fpo_id.clone()),
        field_line("Constitution:", display_or_na(fpo.constitution.as_deref())),
        field_line("Entity Name:", fpo.entity_name.clone()),
        field_line(
            "Number of Farmers:",
            fpo.no_of_farmers
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        field_line("Address:", display_or_na(fpo.address.as_deref())),
        field_line("State:", display_or_na(fpo.state.as_deref())),
        field_line("District:", display_or_na(fpo.district.as_deref())),
        field_line(
            "Area of Operation:",
            fpo.area_of_operation
                .map(|a| a.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        field_line(
            "Establishment Year:",
            display_or_na(fpo.establishment_year.as_deref()),
        ),
        field_line(
            "Major Crops:",
            if fpo.major_crop_produced.is_empty() {
                "N/A".to_string()
            } else {
                fpo.major_crop_produced.join(", ")
            },
        ),
        field_line(
            "Prev. Year Turnover:",
            fpo.previous_year_turnover
                .map(|t| t.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        field_line(
            "Contact Person:",
            display_or_na(fpo.contact_person_name.as_deref()),
        ),
        field_line(
            "Contact Phone:",
            display_or_na(fpo.contact_person_phone.as_deref()),
        ),
        Line::from(""),
        Line::from(Span::styled("Compliance Documents", Styles::title())),
        field_line("PAN Number:", display_or_na(fpo.pan_no.as_deref())),
        field_line(
            "PAN Copy Collected:",
            display_yes_no(fpo.is_pan_copy_collected).to_string(),
        ),
    ];

    if let Some(image) = &fpo.pan_image {
        lines.push(field_line("  Image:", image.clone()));
    }

    lines.push(field_line(
        "Incorporation Doc:",
        display_yes_no(fpo.is_incorporation_doc_collected).to_string(),
    ));
    if let Some(image) = &fpo.incorporation_doc_img {
        lines.push(field_line("  Image:", image.clone()));
    }

    lines.push(field_line(
        "Registration No:",
        display_or_na(fpo.registration_no.as_deref()),
    ));
    lines.push(field_line(
        "Reg. No Collected:",
        display_yes_no(fpo.is_registration_no_collected).to_string(),
    ));
    if let Some(image) = &fpo.registration_no_img {
        lines.push(field_line("  Image:", image.clone()));
    }

    lines.push(field_line(
        "Director List:",
        display_yes_no(fpo.is_director_shareholder_list_collected).to_string(),
    ));
    if let Some(image) = &fpo.director_shareholder_list_image {
        lines.push(field_line("  Image:", image.clone()));
    }

    lines.push(Line::from(""));
    lines.push(field_line("Active:", display_yes_no(fpo.active).to_string()));
    lines.push(field_line(
        "Created At:",
        display_date(fpo.created_at.as_deref()),
    ));
    lines.push(field_line(
        "Updated At:",
        display_date(fpo.updated_at.as_deref()),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓: Scroll | ESC/Enter: Close",
        Styles::inactive(),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use serde_json::json;

    fn sample_fpo(id: &str, name: &str) -> Fpo {
        serde_json::from_value(json!({
            "id": id,
            "fpo_id": format!("FPO-{}", id),
            "entity_name": name,
        }))
        .unwrap()
    }

    fn loaded_screen() -> FpoListScreen {
        let mut screen = FpoListScreen::new(10);
        let token = screen.fpos.begin();
        screen.fpos.finish::<ApiError>(
            token,
            Ok(vec![
                sample_fpo("fpo-1", "Green Fields"),
                sample_fpo("fpo-2", "Sunrise"),
            ]),
        );
        screen.reset_selection();
        screen
    }

    #[test]
    fn test_selection_projects_over_loaded_page() {
        let mut screen = loaded_screen();
        assert_eq!(screen.selected_fpo().unwrap().id, "fpo-1");

        screen.navigate_down();
        assert_eq!(screen.selected_fpo().unwrap().entity_name, "Sunrise");
    }

    #[test]
    fn test_open_detail_reuses_selected_row() {
        let mut screen = loaded_screen();
        screen.navigate_down();
        screen.open_detail();

        assert!(screen.show_detail);
        assert_eq!(screen.selected_fpo().unwrap().id, "fpo-2");

        screen.close_detail();
        assert!(!screen.show_detail);
    }

    #[test]
    fn test_open_detail_without_selection_is_a_no_op() {
        let mut screen = FpoListScreen::new(10);
        screen.open_detail();
        assert!(!screen.show_detail);
    }
}
