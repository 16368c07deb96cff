pub mod report;

use serde::Serialize;

use crate::record::PresentationRecord;

/// Shown by the gallery when nothing matches.
pub const EMPTY_TITLE: &str = "Презентации не найдены";
pub const EMPTY_HINT: &str = "Добавьте презентации через админ-панель";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// A gallery card as it is rendered.
#[derive(Clone, Debug, Serialize)]
pub struct CardRecord {
    pub title: String,
    pub link: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

pub fn build_cards(records: &[PresentationRecord]) -> Vec<CardRecord> {
    records
        .iter()
        .map(|r| CardRecord {
            title: r.title.clone(),
            link: r.link.clone(),
            category: r.display_category().to_string(),
            date: r.date.clone(),
        })
        .collect()
}

pub fn render(format: OutputFormat, cards: &[CardRecord]) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(cards),
        OutputFormat::Json => render_json(cards),
        OutputFormat::Html => render_html(cards),
    }
}

pub fn render_text(cards: &[CardRecord]) -> Vec<u8> {
    let mut out = String::new();
    if cards.is_empty() {
        out.push_str(EMPTY_TITLE);
        out.push('\n');
        out.push_str(EMPTY_HINT);
        out.push('\n');
        return out.into_bytes();
    }
    for c in cards {
        out.push_str(&format!("[{}] {} - {}\n", c.category, c.title, c.link));
    }
    out.into_bytes()
}

pub fn render_json(cards: &[CardRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(cards).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render_html(cards: &[CardRecord]) -> Vec<u8> {
    report::render_html(cards)
}

/// Admin listing: position, id, title and link of every saved record.
pub fn render_admin_text(records: &[PresentationRecord]) -> String {
    let mut out = String::new();
    for (index, r) in records.iter().enumerate() {
        let id = r.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{index:>3}  {id}  {}\n", r.title));
        out.push_str(&format!("     {}  [{}]", r.link, r.display_category()));
        if let Some(date) = r.date.as_deref() {
            out.push_str(&format!("  {date}"));
        }
        out.push('\n');
    }
    out
}
