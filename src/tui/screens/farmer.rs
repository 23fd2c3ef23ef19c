//! Farmer dossier screen: id lookup plus tabbed detail panels
//!
//! All four tabs render from the same resolved dossier; sub-entities the
//! chain skipped show as "not on file" rather than an error.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::loader::{FarmerDossier, LoadState, Tracked};
use crate::models::{display_date, display_or_na, display_yes_no};
use crate::tui::ui::{InputField, Styles};

pub const TAB_TITLES: [&str; 4] = ["Profile", "KYC", "Identity", "Address"];

/// Farmer dossier screen state
pub struct FarmerScreen {
    pub id_input: InputField,
    pub dossier: Tracked<FarmerDossier>,
    pub active_tab: usize,
    pub has_attempted: bool,
    pub content_scroll: u16,
}

impl FarmerScreen {
    pub fn new() -> Self {
        let mut id_input =
            InputField::new("Farmer Record ID").with_placeholder("e.g., f-123 (Enter to load)");
        id_input.set_focus(true);

        Self {
            id_input,
            dossier: Tracked::new(),
            active_tab: 0,
            has_attempted: false,
            content_scroll: 0,
        }
    }

    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % TAB_TITLES.len();
        self.content_scroll = 0;
    }

    pub fn previous_tab(&mut self) {
        self.active_tab = if self.active_tab == 0 {
            TAB_TITLES.len() - 1
        } else {
            self.active_tab - 1
        };
        self.content_scroll = 0;
    }

    /// The platform farmer id of the loaded dossier, used to jump to the
    /// applications screen.
    pub fn loaded_farmer_id(&self) -> Option<String> {
        self.dossier
            .state()
            .ready()
            .map(|d| d.farmer.farmer_id.clone())
            .filter(|id| !id.is_empty())
    }

    /// Draw the farmer dossier screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Id input
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Tab content
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        self.id_input.render(f, chunks[0]);
        self.draw_tabs(f, chunks[1]);
        self.draw_content(f, chunks[2]);
        self.draw_instructions(f, chunks[3]);
    }

    fn draw_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = TAB_TITLES.iter().map(|t| Line::from(*t)).collect();
        let tabs = Tabs::new(titles)
            .select(self.active_tab)
            .highlight_style(Styles::selected())
            .block(
                Block::default()
                    .title("Sections")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(tabs, area);
    }

    fn draw_content(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(TAB_TITLES[self.active_tab])
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        let widget = if !self.has_attempted {
            Paragraph::new("Enter a farmer record id above and press Enter.")
                .style(Styles::inactive())
                .block(block)
        } else {
            match self.dossier.state() {
                LoadState::Pending => Paragraph::new("Loading farmer details...")
                    .style(Styles::info())
                    .block(block),
                LoadState::Failed(message) => Paragraph::new(message.as_str())
                    .style(Styles::error())
                    .block(block),
                LoadState::Ready(dossier) => {
                    let lines = match self.active_tab {
                        0 => profile_lines(dossier),
                        1 => kyc_lines(dossier),
                        2 => identity_lines(dossier),
                        _ => address_lines(dossier),
                    };
                    Paragraph::new(lines)
                        .scroll((self.content_scroll, 0))
                        .block(block)
                }
            }
        };

        f.render_widget(widget, area);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let widget = Paragraph::new(
            "Type id + Enter: Load | Tab/←/→: Sections | Ctrl+a: Applications | ↑/↓: Scroll | ESC: Back",
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
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Styles::info()),
        Span::raw(value),
    ])
}

/// A document attribute with its confidence score, e.g. "Ramesh (cs 0.97)".
fn scored_line(label: &str, value: Option<&str>, score: Option<f64>) -> Line<'static> {
    let mut rendered = display_or_na(value);
    if let Some(cs) = score {
        rendered.push_str(&format!(" (cs {:.2})", cs));
    }
    field_line(label, rendered)
}

fn profile_lines(dossier: &FarmerDossier) -> Vec<Line<'static>> {
    let farmer = &dossier.farmer;
    let mut lines = vec![
        field_line("Record ID:", farmer.id.clone()),
        field_line("Farmer ID:", display_or_na(Some(farmer.farmer_id.as_str()))),
        field_line("Name:", display_or_na(farmer.name.as_deref())),
        field_line("Phone:", display_or_na(farmer.phone_no.as_deref())),
        field_line("Village:", display_or_na(farmer.village.as_deref())),
        field_line(
            "Referral ID:",
            display_or_na(farmer.referral_id.as_deref()),
        ),
        field_line(
            "Status:",
            farmer
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        field_line("Created On:", display_date(farmer.created_at.as_deref())),
    ];

    if let Some(farm) = &farmer.farm_info {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Farm Info", Styles::title())));
        lines.push(field_line(
            "Farm Type:",
            display_or_na(farm.farm_type.as_deref()),
        ));
        lines.push(field_line(
            "Crops:",
            if farm.crops.is_empty() {
                "N/A".to_string()
            } else {
                farm.crops.join(", ")
            },
        ));
    }

    if let Some(land) = &farmer.land_info {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Land Info", Styles::title())));
        lines.push(field_line(
            "Land Area:",
            format!("{} acres", display_or_na(land.area.as_deref())),
        ));
        lines.push(field_line(
            "Location:",
            display_or_na(land.location.as_deref()),
        ));
    }

    if let Some(score) = &farmer.score_card {
        lines.push(field_line(
            "Risk Score:",
            score
                .risk_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ));
    }

    if let Some(report) = &farmer.credit_report {
        lines.push(field_line(
            "Credit History:",
            display_or_na(report.summary.as_deref()),
        ));
    }

    lines
}

fn kyc_lines(dossier: &FarmerDossier) -> Vec<Line<'static>> {
    let Some(kyc) = &dossier.kyc else {
        return vec![Line::from(Span::styled(
            "No KYC record on file for this farmer.",
            Styles::inactive(),
        ))];
    };

    vec![
        field_line("Farmer ID:", kyc.farmer_id.clone()),
        field_line(
            "POI Version:",
            display_or_na(kyc.poi_version_id.as_deref()),
        ),
        field_line(
            "POA Version:",
            display_or_na(kyc.poa_version_id.as_deref()),
        ),
        field_line("Created At:", display_date(kyc.created_at.as_deref())),
        field_line("Updated At:", display_date(kyc.updated_at.as_deref())),
    ]
}

fn identity_lines(dossier: &FarmerDossier) -> Vec<Line<'static>> {
    let Some(poi) = &dossier.poi else {
        return vec![Line::from(Span::styled(
            "No proof of identity on file.",
            Styles::inactive(),
        ))];
    };

    let mut lines = vec![
        scored_line("Name:", poi.name.as_deref(), poi.name_cs),
        scored_line(
            "Date of Birth:",
            poi.date_of_birth.as_deref(),
            poi.date_of_birth_cs,
        ),
        scored_line("Gender:", poi.gender.as_deref(), poi.gender_cs),
        scored_line(
            "Father's Name:",
            poi.father_name.as_deref(),
            poi.father_name_cs,
        ),
        scored_line("ID Number:", poi.id_number.as_deref(), poi.id_number_cs),
        field_line("Verified:", display_yes_no(poi.is_verified).to_string()),
        field_line(
            "Verification:",
            display_or_na(poi.verification_id.as_deref()),
        ),
    ];

    if let Some(image) = &poi.front_image {
        lines.push(field_line("Front Image:", image.clone()));
    }
    if let Some(image) = &poi.back_image {
        lines.push(field_line("Back Image:", image.clone()));
    }
    lines.push(field_line(
        "Updated At:",
        display_date(poi.updated_at.as_deref()),
    ));

    lines
}

fn address_lines(dossier: &FarmerDossier) -> Vec<Line<'static>> {
    let Some(poa) = &dossier.poa else {
        return vec![Line::from(Span::styled(
            "No proof of address on file.",
            Styles::inactive(),
        ))];
    };

    let mut lines = vec![
        scored_line("Name:", poa.name.as_deref(), poa.name_cs),
        scored_line("Care Of:", poa.care_of.as_deref(), poa.care_of_cs),
        scored_line(
            "House Number:",
            poa.house_number.as_deref(),
            poa.house_number_cs,
        ),
        scored_line("Street:", poa.street.as_deref(), poa.street_cs),
        scored_line("Locality:", poa.locality.as_deref(), poa.locality_cs),
        scored_line(
            "Village/Town:",
            poa.village_town.as_deref(),
            poa.village_town_cs,
        ),
        scored_line("District:", poa.district.as_deref(), poa.district_cs),
        scored_line("State:", poa.state.as_deref(), poa.state_cs),
        scored_line("Pincode:", poa.pincode.as_deref(), poa.pincode_cs),
        field_line("Verified:", display_yes_no(poa.is_verified).to_string()),
        field_line(
            "Verification:",
            display_or_na(poa.verification_id.as_deref()),
        ),
    ];

    if let Some(image) = &poa.front_image {
        lines.push(field_line("Front Image:", image.clone()));
    }
    if let Some(image) = &poa.back_image {
        lines.push(field_line("Back Image:", image.clone()));
    }
    lines.push(field_line(
        "Updated At:",
        display_date(poa.updated_at.as_deref()),
    ));

    lines
}
