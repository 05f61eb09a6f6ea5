use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Repositories to chart, in "owner/repo" format
    pub repositories: Vec<String>,

    /// Seconds between automatic dashboard refreshes
    #[serde(default = "default_auto_refresh_interval")]
    pub auto_refresh_interval: u64,

    /// Whether bot accounts start visible (toggleable at runtime)
    #[serde(default)]
    pub show_bots: bool,
}

fn default_auto_refresh_interval() -> u64 {
    300
}
