use crossterm::style::{ContentStyle, Stylize};

/// Theme tokens for consistent styling across the prompts
pub struct Theme {
    pub title: ContentStyle,
    pub selected: ContentStyle,
    pub normal: ContentStyle,
    pub muted: ContentStyle,
    pub danger: ContentStyle,
    pub warning: ContentStyle,
    pub success: ContentStyle,
    pub key_hint: ContentStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: ContentStyle::new().cyan().bold(),
            selected: ContentStyle::new().black().on_cyan().bold(),
            normal: ContentStyle::new().white(),
            muted: ContentStyle::new().dark_grey(),
            danger: ContentStyle::new().red().bold(),
            warning: ContentStyle::new().yellow().bold(),
            success: ContentStyle::new().green().bold(),
            key_hint: ContentStyle::new().yellow(),
        }
    }
}
