use cityweather_core::{Daypart, DisplayModel, FetchError, HistoryEntry};

pub fn display(model: &DisplayModel, daypart: Daypart) -> String {
    format!(
        "{}\n  {}\n  {}\n  Icon: {}\n  Background: {} ({})",
        model.title,
        model.temperature,
        model.humidity,
        model.icon_url,
        daypart.as_str(),
        daypart.color(),
    )
}

pub fn error(city: &str, err: &FetchError) -> String {
    match err {
        FetchError::InvalidInput => format!("Error: {}", err.user_message()),
        _ => format!("Error for '{}': {}", city.trim(), err.user_message()),
    }
}

pub fn history<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> String {
    let lines: Vec<String> = entries.into_iter().map(|e| format!("  {e}")).collect();

    if lines.is_empty() {
        "Search History: (empty)".to_string()
    } else {
        format!("Search History:\n{}", lines.join("\n"))
    }
}
