pub mod browser;
pub mod config;
pub mod credentials;
pub mod dashboard;
pub mod fetch;
pub mod github;
pub mod output;
pub mod tui;
