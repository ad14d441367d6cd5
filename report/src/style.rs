use owo_colors::OwoColorize;

/// Colour role of a piece of output. Plain text when colour is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warn,
    Bad,
    Heading,
    Dim,
}

pub fn paint(text: &str, tone: Tone, color_enabled: bool) -> String {
    if !color_enabled {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.green().bold().to_string(),
        Tone::Warn => text.yellow().bold().to_string(),
        Tone::Bad => text.red().bold().to_string(),
        Tone::Heading => text.bold().to_string(),
        Tone::Dim => text.dimmed().to_string(),
    }
}

/// Render a number the way it was sent: `82`, `82.5`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Fraction in `0..=1` as a rounded percentage.
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", format_number((fraction * 100.0).round()))
}
