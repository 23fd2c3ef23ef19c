//! Screen modules for the agridesk TUI

pub mod applications;
pub mod farmer;
pub mod fpo_list;
pub mod main_menu;

pub use applications::ApplicationsScreen;
pub use farmer::FarmerScreen;
pub use fpo_list::FpoListScreen;
pub use main_menu::MainMenuScreen;
