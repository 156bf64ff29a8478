#![allow(dead_code)]

use review_scraper::PageWindow;

/// One G2 review card dated `date` (`YYYY-MM-DD`)
pub fn g2_card(title: &str, date: &str) -> String {
    format!(
        r#"<div class="paper">
             <h3>{title}</h3>
             <span class="fw-semibold">4.5</span>
             <time datetime="{date}T09:00:00Z">{date}</time>
             <p>{title} review body</p>
           </div>"#
    )
}

/// A G2 listing page holding one card per `(title, date)` pair, in order
pub fn g2_page(cards: &[(&str, &str)]) -> String {
    let body: String = cards.iter().map(|(t, d)| g2_card(t, d)).collect();
    format!("<html><body><section class=\"reviews\">{body}</section></body></html>")
}

/// Three in-window cards, newest first
pub fn full_january_page(page: u32) -> String {
    let a = format!("p{page}-a");
    let b = format!("p{page}-b");
    let c = format!("p{page}-c");
    g2_page(&[
        (a.as_str(), "2024-01-25"),
        (b.as_str(), "2024-01-15"),
        (c.as_str(), "2024-01-05"),
    ])
}

pub fn january() -> PageWindow {
    PageWindow::parse("2024-01-01", "2024-01-31").unwrap()
}
