use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub slideshow: SlideshowConfig,
    #[serde(default)]
    pub visibility: VisibilityConfig,
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            ui: UiConfig::default(),
            navigation: NavigationConfig::default(),
            progress: ProgressConfig::default(),
            scroll: ScrollConfig::default(),
            input: InputConfig::default(),
            typing: TypingConfig::default(),
            slideshow: SlideshowConfig::default(),
            visibility: VisibilityConfig::default(),
            sections: default_sections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for the log file written while the TUI owns the terminal
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle poll rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            theme: default_theme_name(),
        }
    }
}

/// Section-change thresholds and transition timings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Accumulated wheel delta needed to change section
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f64,
    /// Touch drag distance needed to change section
    #[serde(default = "default_touch_threshold")]
    pub touch_threshold: f64,
    /// Idle time after which a partial wheel gesture is forgotten
    #[serde(default = "default_decay_ms")]
    pub decay_ms: u64,
    /// Animation length for wheel/touch driven transitions
    #[serde(default = "default_gesture_transition_ms")]
    pub gesture_transition_ms: u64,
    /// Animation length for nav link jumps
    #[serde(default = "default_link_transition_ms")]
    pub link_transition_ms: u64,
    /// Session store key holding the last viewed section
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: default_wheel_threshold(),
            touch_threshold: default_touch_threshold(),
            decay_ms: default_decay_ms(),
            gesture_transition_ms: default_gesture_transition_ms(),
            link_transition_ms: default_link_transition_ms(),
            session_key: default_session_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Delay between the 100% confirmation and the fade-out
    #[serde(default = "default_confirm_hide_ms")]
    pub confirm_hide_ms: u64,
    /// Delay between fade-out and the instantaneous fill reset
    #[serde(default = "default_fill_reset_ms")]
    pub fill_reset_ms: u64,
    /// Delay before fill transitions are restored after a reset
    #[serde(default = "default_transition_restore_ms")]
    pub transition_restore_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            confirm_hide_ms: default_confirm_hide_ms(),
            fill_reset_ms: default_fill_reset_ms(),
            transition_restore_ms: default_transition_restore_ms(),
        }
    }
}

/// Easing curve for section transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the target
    None,
    Linear,
    /// 4t³ for the first half, 1 - (-2t+2)³/2 for the second
    #[default]
    EaseInOutCubic,
    /// Cubic ease-out: 1 - (1-t)³
    Cubic,
    /// Quintic ease-out: 1 - (1-t)⁵
    Quintic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            easing: EasingType::default(),
        }
    }
}

/// How terminal input is translated into gesture deltas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Wheel delta reported per mouse wheel notch
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f64,
    /// Lines a section scrolls internally per notch
    #[serde(default = "default_lines_per_notch")]
    pub lines_per_notch: u16,
    /// Touch units per terminal row of mouse drag
    #[serde(default = "default_touch_row_units")]
    pub touch_row_units: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_step: default_wheel_step(),
            lines_per_notch: default_lines_per_notch(),
            touch_row_units: default_touch_row_units(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingConfig {
    #[serde(default = "default_typing_delay")]
    pub typing_delay_ms: u64,
    #[serde(default = "default_erasing_delay")]
    pub erasing_delay_ms: u64,
    /// Hold time before erasing, and before the very first phrase
    #[serde(default = "default_new_text_delay")]
    pub new_text_delay_ms: u64,
    #[serde(default = "default_phrases")]
    pub phrases: Vec<PhraseConfig>,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay(),
            erasing_delay_ms: default_erasing_delay(),
            new_text_delay_ms: default_new_text_delay(),
            phrases: default_phrases(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseConfig {
    pub text: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideshowConfig {
    #[serde(default = "default_slide_interval")]
    pub interval_ms: u64,
    /// Each slide is a small block of text art
    #[serde(default = "default_slides")]
    pub slides: Vec<String>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_slide_interval(),
            slides: default_slides(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityConfig {
    /// Fraction of an element that must be on screen before it is shown
    #[serde(default = "default_visibility_threshold")]
    pub threshold: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            threshold: default_visibility_threshold(),
        }
    }
}

/// Rendering style of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Typewriter banner and slideshow
    Hero,
    #[default]
    Cards,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Stable identifier used by nav links
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub kind: SectionKind,
    #[serde(default)]
    pub cards: Vec<CardConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_tick_rate() -> u64 {
    250
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_wheel_threshold() -> f64 {
    150.0
}

fn default_touch_threshold() -> f64 {
    80.0
}

fn default_decay_ms() -> u64 {
    300
}

fn default_gesture_transition_ms() -> u64 {
    1200
}

fn default_link_transition_ms() -> u64 {
    1000
}

fn default_session_key() -> String {
    "lastSection".to_string()
}

fn default_confirm_hide_ms() -> u64 {
    200
}

fn default_fill_reset_ms() -> u64 {
    400
}

fn default_transition_restore_ms() -> u64 {
    50
}

fn default_wheel_step() -> f64 {
    50.0 // three notches reach the default wheel threshold
}

fn default_lines_per_notch() -> u16 {
    3
}

fn default_touch_row_units() -> f64 {
    20.0
}

fn default_typing_delay() -> u64 {
    100
}

fn default_erasing_delay() -> u64 {
    50
}

fn default_new_text_delay() -> u64 {
    2000
}

fn default_slide_interval() -> u64 {
    4000
}

fn default_visibility_threshold() -> f64 {
    0.15
}

fn phrase(text: &str, subtitle: &str, tags: &[&str]) -> PhraseConfig {
    PhraseConfig {
        text: text.to_string(),
        subtitle: subtitle.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn default_phrases() -> Vec<PhraseConfig> {
    vec![
        phrase(
            "a Curious Builder",
            "Welcome to my portfolio",
            &["Problem Solver", "Tech Enthusiast", "Fast Learner"],
        ),
        phrase(
            "an AI Engineer",
            "Building intelligent models and LLM tooling",
            &[
                "Python",
                "Transformers",
                "Hugging Face",
                "Kaggle",
                "LLM",
                "Machine Learning",
                "Deep Learning",
                "Computer Vision",
            ],
        ),
        phrase(
            "a Robot Programmer",
            "Developing advanced control and navigation",
            &["ROS 2", "STM32", "C++", "Computer Vision", "SLAM"],
        ),
        phrase(
            "a Game Developer",
            "Crafting interactive mechanics and experiences",
            &["Unity", "Godot", "Game Design", "2D Games", "3D Games", "C#", "GDScript"],
        ),
    ]
}

fn default_slides() -> Vec<String> {
    vec![
        "  .---.  \n / o o \\ \n|   ^   |\n \\ '-' / \n  '---'  ".to_string(),
        "  .---.  \n / ^ ^ \\ \n|   o   |\n \\ \\_/ / \n  '---'  ".to_string(),
        "  .---.  \n / - - \\ \n|   >   |\n \\ ___ / \n  '---'  ".to_string(),
    ]
}

fn card(title: &str, lines: &[&str]) -> CardConfig {
    CardConfig {
        title: title.to_string(),
        lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

fn section(id: &str, title: &str, kind: SectionKind, cards: Vec<CardConfig>) -> SectionConfig {
    SectionConfig {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        cards,
    }
}

fn default_sections() -> Vec<SectionConfig> {
    vec![
        section("hero", "Home", SectionKind::Hero, Vec::new()),
        section(
            "education",
            "Education",
            SectionKind::Cards,
            vec![
                card(
                    "B.Sc. Computer Engineering",
                    &["2020 - 2024", "Robotics and embedded systems track"],
                ),
                card(
                    "Machine Learning Specialization",
                    &["Online, 2023", "Supervised and unsupervised learning"],
                ),
            ],
        ),
        section(
            "experience",
            "Experience",
            SectionKind::Cards,
            vec![
                card(
                    "AI Engineer Intern",
                    &[
                        "2024",
                        "Fine-tuned transformer models for document classification",
                        "Built evaluation pipelines for LLM prompts",
                    ],
                ),
                card(
                    "Robotics Team Programmer",
                    &[
                        "2021 - 2023",
                        "Wrote motor control firmware on STM32",
                        "Integrated LiDAR-inertial odometry with ROS 2",
                        "Led the navigation stack rewrite",
                    ],
                ),
                card(
                    "Game Jam Developer",
                    &["2020 - present", "Shipped six jam games in Godot and Unity"],
                ),
            ],
        ),
        section(
            "projects",
            "Projects",
            SectionKind::Cards,
            vec![
                card("Autonomous Rover", &["ROS 2, C++", "Indoor mapping and path planning"]),
                card("Sign Language Reader", &["PyTorch", "Real-time hand pose classification"]),
                card("Tiny Platformer", &["Godot, GDScript", "A 2D platformer built in 48 hours"]),
            ],
        ),
        section(
            "achievement",
            "Achievements",
            SectionKind::Cards,
            vec![
                card("National Robotics Contest", &["Finalist, 2023"]),
                card("Kaggle Competition", &["Bronze medal, 2024"]),
            ],
        ),
        section(
            "contact",
            "Contact",
            SectionKind::Cards,
            vec![card("Say hello", &["mail: hello@example.com", "github: example"])],
        ),
    ]
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

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

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used while the TUI is running
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    /// Reject configurations the navigation engine cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.sections.is_empty() {
            return Err(crate::Error::Config("at least one section is required".into()));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(crate::Error::Config(format!(
                    "section '{}' has an empty id",
                    section.title
                )));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(crate::Error::Config(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
        }

        let nav = &self.navigation;
        if !(nav.wheel_threshold > 0.0) || !(nav.touch_threshold > 0.0) {
            return Err(crate::Error::Config(
                "navigation thresholds must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.visibility.threshold) {
            return Err(crate::Error::Config(
                "visibility threshold must be within 0.0..=1.0".into(),
            ));
        }

        Ok(())
    }
}
