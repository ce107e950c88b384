//! Plain-text rendering of page views for the terminal.
//!
//! Each renderer collects output lines and joins them; every returned
//! string ends with a newline.

use crate::core::details_page::BACK_TITLE;
use crate::core::list_page::{drawer_items, PAGE_TITLE, SEARCH_PLACEHOLDER};
use crate::core::{DetailsView, ListView};
use crate::domain::{FilterOptions, Tab};

const TITLE_WIDTH: usize = 40;

/// Cut a string to `width` characters, marking the cut with "..."
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Page header: title, tab bar and search box
pub fn render_header(active: Tab, search_text: &str) -> String {
    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect();

    let search = if search_text.is_empty() {
        format!("Search: ({})", SEARCH_PLACEHOLDER)
    } else {
        format!("Search: {}", search_text)
    };

    join_lines(vec![PAGE_TITLE.to_string(), tabs.join(" "), search])
}

/// Tab body: loading indicator or the card grid
pub fn render_grid(view: &ListView) -> String {
    let cards = match view {
        ListView::Loading => return "Loading...\n".to_string(),
        ListView::Grid(cards) => cards,
    };

    if cards.is_empty() {
        return "No content found\n".to_string();
    }

    let mut lines = vec![
        format!("{:<24} {:<12} {:<40}", "ID", "TYPE", "TITLE"),
        "-".repeat(80),
    ];
    for card in cards {
        lines.push(format!(
            "{:<24} {:<12} {:<40}",
            card.identifier,
            truncate(&card.actions, 12),
            truncate(&card.title, TITLE_WIDTH)
        ));
        lines.push(format!("{:<24} {}", "", truncate(&card.content, 60)));
        lines.push(format!("{:<24} image: {}", "", card.image));
    }
    lines.push(String::new());
    lines.push(format!("Total: {} items", cards.len()));
    join_lines(lines)
}

/// Navigation drawer
pub fn render_drawer() -> String {
    let lines = drawer_items()
        .iter()
        .map(|item| format!("  {:<10} {}", item.text, item.route))
        .collect();
    join_lines(lines)
}

/// Details page
pub fn render_details(view: &DetailsView) -> String {
    let content = match view {
        DetailsView::Placeholder(text) => return format!("{}\n", text),
        DetailsView::Content(content) => content,
    };

    let mut lines = vec![format!("< {}", BACK_TITLE), "=".repeat(66)];
    if content.loading {
        lines.push("  (loading)".to_string());
    }
    lines.push(format!("  {}", content.name));
    lines.push(format!("  Poster: {}", content.poster));
    lines.push(String::new());
    lines.push("Description".to_string());
    lines.push(format!("  {}", content.description));
    lines.push(String::new());
    lines.push("Tags".to_string());
    if !content.tags.is_empty() {
        let chips: Vec<String> = content.tags.iter().map(|t| format!("[{}]", t)).collect();
        lines.push(format!("  {}", chips.join(" ")));
    }
    lines.push("-".repeat(66));
    let label = content.start_label;
    lines.push(format!("  {} -> {}", label, content.start_route));
    join_lines(lines)
}

/// Filter panel options
pub fn render_filter_options(options: &FilterOptions) -> String {
    let mut lines = Vec::new();
    for (field, values) in &options.fields {
        lines.push(format!("{}:", field));
        lines.extend(values.iter().map(|value| format!("  - {}", value)));
    }
    if options.sort {
        lines.push("sort: asc | desc".to_string());
    }
    if lines.is_empty() {
        return String::new();
    }
    join_lines(lines)
}
