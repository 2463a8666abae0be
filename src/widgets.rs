use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three radio-button options, mirroring the dashboard page.
pub const CHOICES: [&str; 3] = ["Opção 1", "Opção 2", "Opção 3"];

/// Values captured from the unrelated input widgets on the page: a date, free
/// text, a 0–100 slider, a one-of-three radio, a checkbox and a color picker.
///
/// These carry no cross-cutting logic. Each value is captured from the render
/// request and echoed straight back in the response; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetValues {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub text: String,
    /// Slider value. Deserialized through a wider integer and snapped into
    /// 0–100, so an out-of-range value clamps instead of failing the whole
    /// widget payload.
    #[serde(default, deserialize_with = "clamped_number")]
    pub number: u8,
    #[serde(default = "default_choice")]
    pub choice: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_choice() -> String {
    CHOICES[0].to_string()
}

fn default_color() -> String {
    "#000000".to_string()
}

fn clamped_number<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, 100) as u8)
}

impl Default for WidgetValues {
    fn default() -> Self {
        Self {
            date: None,
            text: String::new(),
            number: 0,
            choice: default_choice(),
            checked: false,
            color: default_color(),
        }
    }
}

impl WidgetValues {
    /// Snaps out-of-range values back to what the input controls allow:
    /// the slider tops out at 100 and the radio only knows its three options.
    pub fn clamped(mut self) -> Self {
        self.number = self.number.min(100);
        if !CHOICES.contains(&self.choice.as_str()) {
            self.choice = default_choice();
        }
        self
    }
}
