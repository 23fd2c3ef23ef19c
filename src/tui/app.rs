//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use super::screens::*;
use super::ui::centered_rect;
use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::loader::{load_farmer_dossier, LoadState};

/// Application screens
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    MainMenu,
    FpoDirectory,
    Farmer,
    Applications,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Previous screen for navigation
    pub previous_screen: Option<Screen>,
    /// Application configuration
    pub config: Config,
    /// Platform API client
    pub api: ApiClient,

    // Screen states
    pub main_menu: MainMenuScreen,
    pub fpo_list: FpoListScreen,
    pub farmer: FarmerScreen,
    pub applications: ApplicationsScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config)?;

        Ok(Self {
            current_screen: Screen::MainMenu,
            previous_screen: None,
            main_menu: MainMenuScreen::new(),
            fpo_list: FpoListScreen::new(config.page_limit),
            farmer: FarmerScreen::new(),
            applications: ApplicationsScreen::new(),
            config,
            api,

            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,
        })
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Ok(event) = crossterm::event::read() {
                if let crossterm::event::Event::Key(key) = event {
                    self.handle_key_event(key).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Global shortcuts
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Char('?') if !self.screen_accepts_text() => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return Ok(());
            }
            // 'q' quits except where it would swallow typed input
            KeyCode::Char('q') if !self.screen_accepts_text() => {
                self.should_quit = true;
                return Ok(());
            }
            _ => {}
        }

        if !self.show_help_popup {
            match self.current_screen {
                Screen::MainMenu => self.handle_main_menu_event(key).await?,
                Screen::FpoDirectory => self.handle_fpo_event(key).await?,
                Screen::Farmer => self.handle_farmer_event(key).await?,
                Screen::Applications => self.handle_applications_event(key).await?,
            }
        }

        Ok(())
    }

    /// Screens with a text input must receive printable characters.
    fn screen_accepts_text(&self) -> bool {
        matches!(self.current_screen, Screen::Farmer | Screen::Applications)
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.current_screen {
            Screen::MainMenu => self.main_menu.draw(f, chunks[0]),
            Screen::FpoDirectory => self.fpo_list.draw(f, chunks[0]),
            Screen::Farmer => self.farmer.draw(f, chunks[0]),
            Screen::Applications => self.applications.draw(f, chunks[0]),
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            format!(
                "Agridesk - {} | ESC: Back | F1: Help",
                match self.current_screen {
                    Screen::MainMenu => "Main Menu",
                    Screen::FpoDirectory => "FPO Directory",
                    Screen::Farmer => "Farmer Dossier",
                    Screen::Applications => "Applications",
                }
            )
        };

        let style = if self.error_message.is_some() {
            Style::default().fg(Color::Red)
        } else if self.status_message.is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(80, 70, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            ESC - Go back\n\
            F1 - Toggle this help\n\
            q - Quit (from menu and directory screens)\n\n";

        let screen_help = match self.current_screen {
            Screen::MainMenu => {
                "Main Menu:\n\
                ↑/↓ - Navigate menu\n\
                Enter - Select option\n\
                F - FPO Directory\n\
                D - Farmer Dossier\n\
                A - Applications"
            }
            Screen::FpoDirectory => {
                "FPO Directory:\n\
                ↑/↓ - Navigate FPOs\n\
                Enter - Open detail modal (no network call)\n\
                ←/→ - Previous/next page\n\
                r - Refresh current page\n\
                ESC - Close modal / back to menu"
            }
            Screen::Farmer => {
                "Farmer Dossier:\n\
                Type + Enter - Load dossier by record id\n\
                Tab / ←/→ - Switch sections\n\
                ↑/↓ - Scroll section content\n\
                Ctrl+A - Applications for this farmer"
            }
            Screen::Applications => {
                "Applications:\n\
                Type + Enter - Load by farmer id\n\
                ↑/↓ - Navigate applications\n\
                Enter - Reload"
            }
        };

        format!("{}{}", global_help, screen_help)
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        self.previous_screen = Some(self.current_screen.clone());
        self.current_screen = screen;
        self.clear_messages();
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    // Event handlers for each screen

    async fn handle_main_menu_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => self.main_menu.select_previous(),
            KeyCode::Down => self.main_menu.select_next(),
            KeyCode::Enter => {
                let target = self.main_menu.selected_option().map(|o| o.screen.clone());
                if let Some(screen) = target {
                    self.enter_screen(screen).await;
                }
            }
            KeyCode::Char(c) => {
                let upper_c = c.to_ascii_uppercase();
                let target = self
                    .main_menu
                    .menu_options
                    .iter()
                    .find(|option| option.shortcut == upper_c)
                    .map(|option| option.screen.clone());
                if let Some(screen) = target {
                    self.enter_screen(screen).await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Navigate to a screen, kicking off its initial load where one applies.
    async fn enter_screen(&mut self, screen: Screen) {
        self.navigate_to_screen(screen.clone());
        // The dossier chain needs the bearer token; warn before the user
        // types an id only to hit the precondition failure.
        if screen == Screen::Farmer && !self.api.has_token() {
            self.set_error(ApiError::MissingToken.to_string());
        }
        if screen == Screen::FpoDirectory && !self.fpo_list.loaded_once {
            self.load_fpo_page().await;
        }
    }

    async fn handle_fpo_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.fpo_list.show_detail {
            match key.code {
                KeyCode::Up => {
                    self.fpo_list.detail_scroll = self.fpo_list.detail_scroll.saturating_sub(1);
                }
                KeyCode::Down => {
                    self.fpo_list.detail_scroll += 1;
                }
                KeyCode::Esc | KeyCode::Enter => {
                    self.fpo_list.close_detail();
                }
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Up => self.fpo_list.navigate_up(),
            KeyCode::Down => self.fpo_list.navigate_down(),
            KeyCode::Enter => {
                // Detail view is a local projection of the fetched page
                let selected = self.fpo_list.selected_fpo().map(|f| f.entity_name.clone());
                match selected {
                    Some(name) => {
                        self.fpo_list.open_detail();
                        self.set_status(format!("Viewing {}", name));
                    }
                    None => self.set_error("No FPO selected".to_string()),
                }
            }
            KeyCode::Left => {
                if self.fpo_list.skip > 0 {
                    self.fpo_list.previous_page();
                    self.load_fpo_page().await;
                }
            }
            KeyCode::Right => {
                self.fpo_list.next_page();
                self.load_fpo_page().await;
            }
            KeyCode::Char('r') => {
                self.load_fpo_page().await;
            }
            KeyCode::Esc => {
                self.navigate_to_screen(Screen::MainMenu);
            }
            _ => {}
        }
        Ok(())
    }

    /// Fetch the current FPO directory page through the tracked loader.
    async fn load_fpo_page(&mut self) {
        self.set_status("Loading FPO directory...".to_string());

        let token = self.fpo_list.fpos.begin();
        let result = self
            .api
            .list_fpos(self.fpo_list.skip, self.fpo_list.limit)
            .await;

        if self.fpo_list.fpos.finish(token, result) {
            self.fpo_list.loaded_once = true;
            self.fpo_list.reset_selection();
            let outcome = match self.fpo_list.fpos.state() {
                LoadState::Ready(fpos) => Ok(fpos.len()),
                LoadState::Failed(message) => Err(message.clone()),
                LoadState::Pending => return,
            };
            match outcome {
                Ok(count) => self.set_status(format!("Loaded {} FPOs", count)),
                Err(message) => self.set_error(message),
            }
        }
    }

    async fn handle_farmer_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => {
                self.load_farmer().await;
            }
            KeyCode::Tab | KeyCode::Right => {
                self.farmer.next_tab();
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.farmer.previous_tab();
            }
            KeyCode::Up => {
                self.farmer.content_scroll = self.farmer.content_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.farmer.content_scroll += 1;
            }
            // Ctrl+A so plain 'a' still types into the id field
            KeyCode::Char('a')
                if key
                    .modifiers
                    .contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                self.open_applications_for_loaded_farmer().await;
            }
            KeyCode::Char(c) => {
                self.farmer.id_input.insert_char(c);
            }
            KeyCode::Backspace => {
                self.farmer.id_input.delete_char();
            }
            KeyCode::Esc => {
                self.navigate_to_screen(Screen::MainMenu);
            }
            _ => {}
        }
        Ok(())
    }

    /// Resolve the farmer dossier chain for the id in the input field.
    async fn load_farmer(&mut self) {
        let id = self.farmer.id_input.value.trim().to_string();
        if id.is_empty() {
            self.set_error("Enter a farmer record id first".to_string());
            return;
        }

        self.farmer.has_attempted = true;
        self.farmer.active_tab = 0;
        self.farmer.content_scroll = 0;
        self.set_status(format!("Loading dossier for {}...", id));

        let token = self.farmer.dossier.begin();
        let result = load_farmer_dossier(&self.api, &id).await;

        if self.farmer.dossier.finish(token, result) {
            let outcome = match self.farmer.dossier.state() {
                LoadState::Ready(dossier) => Ok(dossier
                    .farmer
                    .name
                    .clone()
                    .unwrap_or_else(|| dossier.farmer.id.clone())),
                LoadState::Failed(message) => Err(message.clone()),
                LoadState::Pending => return,
            };
            match outcome {
                Ok(name) => {
                    self.farmer.id_input.clear();
                    self.set_status(format!("Loaded dossier for {}", name));
                }
                Err(message) => {
                    self.set_error(format!("Failed to fetch farmer data: {}", message));
                }
            }
        }
    }

    /// Jump to the applications screen for the currently loaded farmer.
    async fn open_applications_for_loaded_farmer(&mut self) {
        match self.farmer.loaded_farmer_id() {
            Some(farmer_id) => {
                self.applications.set_farmer_id(&farmer_id);
                self.navigate_to_screen(Screen::Applications);
                self.load_applications().await;
            }
            None => {
                self.set_error("Load a farmer dossier first".to_string());
            }
        }
    }

    async fn handle_applications_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => {
                self.load_applications().await;
            }
            KeyCode::Up => self.applications.navigate_up(),
            KeyCode::Down => self.applications.navigate_down(),
            KeyCode::Char(c) => {
                self.applications.farmer_id_input.insert_char(c);
            }
            KeyCode::Backspace => {
                self.applications.farmer_id_input.delete_char();
            }
            KeyCode::Esc => {
                let back = match self.previous_screen {
                    Some(Screen::Farmer) => Screen::Farmer,
                    _ => Screen::MainMenu,
                };
                self.navigate_to_screen(back);
            }
            _ => {}
        }
        Ok(())
    }

    /// Fetch applications for the farmer id in the input field.
    async fn load_applications(&mut self) {
        let farmer_id = self.applications.farmer_id_input.value.trim().to_string();
        if farmer_id.is_empty() {
            self.set_error("Enter a farmer id first".to_string());
            return;
        }

        self.applications.has_attempted = true;
        self.set_status(format!("Loading applications for {}...", farmer_id));

        let token = self.applications.applications.begin();
        let result = self
            .api
            .list_applications(&farmer_id, 0, self.config.page_limit)
            .await;

        if self.applications.applications.finish(token, result) {
            self.applications.reset_selection();
            let outcome = match self.applications.applications.state() {
                LoadState::Ready(applications) => Ok(applications.len()),
                LoadState::Failed(message) => Err(message.clone()),
                LoadState::Pending => return,
            };
            match outcome {
                Ok(count) => {
                    self.set_status(format!("Found {} applications for {}", count, farmer_id));
                }
                Err(message) => {
                    self.set_error(format!("Failed to fetch applications: {}", message));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    fn test_app(token: Option<&str>) -> App {
        let config = Config {
            api_base_url: "http://localhost:9".to_string(),
            api_token: token.map(|t| t.to_string()),
            page_limit: 10,
            http: HttpConfig::default(),
        };
        App::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_entering_farmer_screen_without_token_warns() {
        let mut app = test_app(None);
        app.enter_screen(Screen::Farmer).await;

        assert_eq!(app.current_screen, Screen::Farmer);
        let error = app.error_message.as_deref().unwrap();
        assert!(error.contains("AGRIDESK_API_TOKEN"));
    }

    #[tokio::test]
    async fn test_entering_farmer_screen_with_token_stays_quiet() {
        let mut app = test_app(Some("test-token"));
        app.enter_screen(Screen::Farmer).await;

        assert!(app.error_message.is_none());
    }
}
