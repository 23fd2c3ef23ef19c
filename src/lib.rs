//! agridesk: terminal admin console for browsing FPO and farmer onboarding
//! records from the agricultural lending platform's read-only API.

pub mod api;
pub mod cli;
pub mod config;
pub mod loader;
pub mod models;
pub mod tui;
