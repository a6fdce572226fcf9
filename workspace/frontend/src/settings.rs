use common::Range;
use log::Level;
use std::str::FromStr;
use wasm_bindgen::JsValue;
use web_sys::window;

/// Prefix of every settings key stored in `localStorage`.
const STORAGE_PREFIX: &str = "fitrack_";

/// Which posts repository backs the social tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialMode {
    /// REST endpoints guarded by a CSRF token.
    Rest,
    /// Demo feed persisted in browser storage only.
    Local,
}

impl SocialMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialMode::Rest => "rest",
            SocialMode::Local => "local",
        }
    }
}

impl FromStr for SocialMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rest" => Ok(SocialMode::Rest),
            "local" | "demo" => Ok(SocialMode::Local),
            _ => Err(()),
        }
    }
}

/// Which plan collection the plan manager reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanCollection {
    /// `/api/plans?date=YYYY-MM-DD`, one day at a time.
    Daily,
    /// `/api/my_plan`, every plan of the signed-in user.
    Mine,
}

impl PlanCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanCollection::Daily => "daily",
            PlanCollection::Mine => "mine",
        }
    }
}

impl FromStr for PlanCollection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "plans" => Ok(PlanCollection::Daily),
            "mine" | "my_plan" => Ok(PlanCollection::Mine),
            _ => Err(()),
        }
    }
}

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Prepended to every `/api/...` path. Empty means same origin.
    pub api_base_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Where the user is sent after a 401
    pub login_url: String,

    pub social_mode: SocialMode,

    pub plan_collection: PlanCollection,

    /// Show the user dropdown on the record tab
    pub show_user_picker: bool,

    pub default_range: Range,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            log_level: Level::Info,
            login_url: "/".to_string(),
            social_mode: SocialMode::Rest,
            plan_collection: PlanCollection::Daily,
            show_user_picker: true,
            default_range: Range::Week,
            toast_duration_ms: 5000,
            debug_mode: false,
        }
    }
}

fn parse_level(raw: &str) -> Option<Level> {
    match raw.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from window location and stored overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            settings.apply_overrides(|key| storage.get_item(key).ok().flatten());
        }

        settings
    }

    /// Applies every recognised `fitrack_*` key returned by `lookup`.
    /// Unparseable values are ignored and leave the current value in place.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{}{}", STORAGE_PREFIX, name));

        if let Some(base) = get("api_base_url") {
            self.api_base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(level) = get("log_level").as_deref().and_then(parse_level) {
            self.log_level = level;
        }
        if let Some(url) = get("login_url").filter(|u| !u.trim().is_empty()) {
            self.login_url = url;
        }
        if let Some(mode) = get("social_mode").and_then(|m| m.parse().ok()) {
            self.social_mode = mode;
        }
        if let Some(collection) = get("plan_collection").and_then(|c| c.parse().ok()) {
            self.plan_collection = collection;
        }
        if let Some(show) = get("show_user_picker") {
            self.show_user_picker = show.trim().eq_ignore_ascii_case("true");
        }
        if let Some(range) = get("default_range").and_then(|r| r.parse().ok()) {
            self.default_range = range;
        }
        if let Some(duration) = get("toast_duration_ms").and_then(|d| d.trim().parse().ok()) {
            self.toast_duration_ms = duration;
        }
    }

    /// Key/value pairs as written to storage.
    pub fn to_storage_entries(&self) -> Vec<(String, String)> {
        [
            ("api_base_url", self.api_base_url.clone()),
            ("log_level", format!("{:?}", self.log_level).to_lowercase()),
            ("login_url", self.login_url.clone()),
            ("social_mode", self.social_mode.as_str().to_string()),
            ("plan_collection", self.plan_collection.as_str().to_string()),
            ("show_user_picker", self.show_user_picker.to_string()),
            ("default_range", self.default_range.as_str().to_string()),
            ("toast_duration_ms", self.toast_duration_ms.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (format!("{}{}", STORAGE_PREFIX, k), v))
        .collect()
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                for (key, value) in self.to_storage_entries() {
                    storage.set_item(&key, &value)?;
                }
            }
        }
        Ok(())
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url, endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
