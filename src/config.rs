//! Ambient configuration, read once at
//! `ContextFactory` construction.

/// Options read once at first context construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// When `false`, `ReplayWindow::check` always accepts but `update`
    /// still runs.
    pub check_replay: bool,
    /// Optional hint naming which AES primitive provider to try first
    /// (e.g. `"aes-openssl"`), bypassing the benchmark when present and
    /// available.
    pub aes_provider_preference: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            check_replay: true,
            aes_provider_preference: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_replay(mut self, check_replay: bool) -> Self {
        self.check_replay = check_replay;
        self
    }

    pub fn with_aes_provider_preference(mut self, name: impl Into<String>) -> Self {
        self.aes_provider_preference = Some(name.into());
        self
    }

    pub(crate) fn apply(&self) {
        if let Some(name) = &self.aes_provider_preference {
            crate::primitive::set_aes_provider_preference(name);
        }
    }
}
