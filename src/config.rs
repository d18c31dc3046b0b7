/// Fixed session settings. Built once in the CLI layer and handed to the
/// components that need them; nothing here is read from disk or mutated
/// after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Typing speed for prompt labels, 0 (slowest) to 10 (instant).
    pub input_speed: f64,
    /// Typing speed for body text and hints.
    pub print_speed: f64,
    /// Cards in a full tarot deck; the card-number prompt accepts 1..=this.
    pub deck_size: usize,
    pub dataset_url: String,
}

pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/Albiahbii/json/main/tarot_card.json";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Tarot Prediction".to_string(),
            input_speed: 7.0,
            print_speed: 6.0,
            deck_size: 78,
            dataset_url: DEFAULT_DATASET_URL.to_string(),
        }
    }
}
