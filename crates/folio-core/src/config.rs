use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::pages::{Page, PageCatalog};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub transition: TransitionConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Ordered page catalog
    #[serde(default = "default_pages")]
    pub pages: Vec<Page>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            gesture: GestureConfig::default(),
            transition: TransitionConfig::default(),
            carousel: CarouselConfig::default(),
            scroll: ScrollConfig::default(),
            pages: default_pages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Thresholds used to turn wheel/touch/click streams into page intents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum time between two accepted transitions
    #[serde(default = "default_cooldown_window")]
    pub cooldown_window_ms: u64,
    /// Wheel delta required outside nested scroll regions
    #[serde(default = "default_page_level_threshold")]
    pub page_level_threshold: f64,
    /// Wheel delta required at the edge of a nested scroll region
    #[serde(default = "default_strong_scroll_threshold")]
    pub strong_scroll_threshold: f64,
    /// Minimum swipe distance outside nested scroll regions (px)
    #[serde(default = "default_min_swipe_page_level")]
    pub min_swipe_distance_page_level: f64,
    /// Minimum swipe distance inside nested scroll regions (px)
    #[serde(default = "default_min_swipe_nested")]
    pub min_swipe_distance_nested: f64,
    /// Swipes slower than this are ignored
    #[serde(default = "default_max_swipe_time")]
    pub max_swipe_time_ms: u64,
    /// Quiet period after which a wheel gesture is considered finished
    #[serde(default = "default_gesture_gap")]
    pub gesture_gap_ms: u64,
    /// Region scroll during a touch that hands the gesture to the region (px)
    #[serde(default = "default_container_absorb_distance")]
    pub container_absorb_distance: f64,
    /// Slack when deciding whether a region sits at its top or bottom edge (px)
    #[serde(default = "default_boundary_tolerance")]
    pub boundary_tolerance: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            cooldown_window_ms: default_cooldown_window(),
            page_level_threshold: default_page_level_threshold(),
            strong_scroll_threshold: default_strong_scroll_threshold(),
            min_swipe_distance_page_level: default_min_swipe_page_level(),
            min_swipe_distance_nested: default_min_swipe_nested(),
            max_swipe_time_ms: default_max_swipe_time(),
            gesture_gap_ms: default_gesture_gap(),
            container_absorb_distance: default_container_absorb_distance(),
            boundary_tolerance: default_boundary_tolerance(),
        }
    }
}

impl GestureConfig {
    pub fn cooldown_window(&self) -> Duration {
        Duration::from_millis(self.cooldown_window_ms)
    }

    pub fn max_swipe_time(&self) -> Duration {
        Duration::from_millis(self.max_swipe_time_ms)
    }

    pub fn gesture_gap(&self) -> Duration {
        Duration::from_millis(self.gesture_gap_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Delay between entering the exit phase and swapping pages (sequential mode)
    #[serde(default = "default_sequential_kickoff")]
    pub sequential_kickoff_ms: u64,
    /// Time the rendering layer gets to finish exit/enter animations
    #[serde(default = "default_transition_settle")]
    pub transition_settle_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            sequential_kickoff_ms: default_sequential_kickoff(),
            transition_settle_ms: default_transition_settle(),
        }
    }
}

impl TransitionConfig {
    pub fn sequential_kickoff(&self) -> Duration {
        Duration::from_millis(self.sequential_kickoff_ms)
    }

    pub fn transition_settle(&self) -> Duration {
        Duration::from_millis(self.transition_settle_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Quiet period after the last scroll event before snapping
    #[serde(default = "default_scroll_stop_debounce")]
    pub scroll_stop_debounce_ms: u64,
    /// Attempts to locate an item that has not been mounted yet
    #[serde(default = "default_mount_retry_attempts")]
    pub mount_retry_attempts: u32,
    /// Delay between mount retries
    #[serde(default = "default_mount_retry_interval")]
    pub mount_retry_interval_ms: u64,
    /// Gap between consecutive cards (px)
    #[serde(default = "default_item_gap")]
    pub item_gap: f64,
    /// Within this many item heights of the bottom, snapping always picks the last item
    #[serde(default = "default_bottom_snap_items")]
    pub bottom_snap_items: f64,
    /// How long an explicit selection owns the scroll position
    #[serde(default = "default_select_release")]
    pub select_release_ms: u64,
    /// How long a snap after free scrolling owns the scroll position
    #[serde(default = "default_snap_release")]
    pub snap_release_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            scroll_stop_debounce_ms: default_scroll_stop_debounce(),
            mount_retry_attempts: default_mount_retry_attempts(),
            mount_retry_interval_ms: default_mount_retry_interval(),
            item_gap: default_item_gap(),
            bottom_snap_items: default_bottom_snap_items(),
            select_release_ms: default_select_release(),
            snap_release_ms: default_snap_release(),
        }
    }
}

impl CarouselConfig {
    pub fn scroll_stop_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_stop_debounce_ms)
    }

    pub fn mount_retry_interval(&self) -> Duration {
        Duration::from_millis(self.mount_retry_interval_ms)
    }

    pub fn select_release(&self) -> Duration {
        Duration::from_millis(self.select_release_ms)
    }

    pub fn snap_release(&self) -> Duration {
        Duration::from_millis(self.snap_release_ms)
    }
}

/// Easing function type for scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// No animation (instant jump)
    None,
    /// Linear interpolation
    Linear,
    /// Cubic ease-out
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Cubic ease-in-out, slow at both ends
    #[default]
    EaseInOutCubic,
}

/// Smooth scrolling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth scrolling animation
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing function
    #[serde(default)]
    pub easing: EasingType,
    /// Target frames per second while animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Distances below this are applied instantly (px)
    #[serde(default = "default_min_scroll_distance")]
    pub min_distance: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
            min_distance: default_min_scroll_distance(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cooldown_window() -> u64 {
    800
}

fn default_page_level_threshold() -> f64 {
    10.0
}

fn default_strong_scroll_threshold() -> f64 {
    30.0
}

fn default_min_swipe_page_level() -> f64 {
    50.0
}

fn default_min_swipe_nested() -> f64 {
    150.0
}

fn default_max_swipe_time() -> u64 {
    500
}

fn default_gesture_gap() -> u64 {
    200
}

fn default_container_absorb_distance() -> f64 {
    10.0
}

fn default_boundary_tolerance() -> f64 {
    1.0
}

fn default_sequential_kickoff() -> u64 {
    10
}

fn default_transition_settle() -> u64 {
    400
}

fn default_scroll_stop_debounce() -> u64 {
    500
}

fn default_mount_retry_attempts() -> u32 {
    5
}

fn default_mount_retry_interval() -> u64 {
    100
}

fn default_item_gap() -> f64 {
    4.0
}

fn default_bottom_snap_items() -> f64 {
    1.5
}

fn default_select_release() -> u64 {
    1200
}

fn default_snap_release() -> u64 {
    1000
}

fn default_scroll_duration() -> u64 {
    600
}

fn default_animation_fps() -> u32 {
    60
}

fn default_min_scroll_distance() -> f64 {
    1.0
}

fn default_pages() -> Vec<Page> {
    vec![
        Page::new("home", "Home", 0),
        Page::new("portfolio", "Portfolio", 1),
        Page::new("work", "Work Experience", 2),
    ]
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Build the validated page catalog
    pub fn catalog(&self) -> crate::Result<PageCatalog> {
        PageCatalog::new(self.pages.clone())
    }
}
