use crate::apis::{company_slug, parse_cards, selector, CardLayout, RatingField};
use crate::constants::CAPTERRA_BASE_URL;
use crate::types::{PageWindow, ParsedPage, Platform, ReviewSource};
use once_cell::sync::Lazy;

static CAPTERRA_LAYOUT: Lazy<CardLayout> = Lazy::new(|| CardLayout {
    card: selector(r#"div[data-test-id="review-card"]"#),
    title: selector("h3"),
    body: selector("p"),
    // aria-label reads like "4.5 out of 5 stars"
    rating: selector("span.star-rating"),
    rating_field: RatingField::AttrLeadingToken("aria-label"),
    date: selector("time"),
});

/// Adapter for `capterra.com/p/<slug>/reviews` listings
pub struct CapterraSource {
    company: String,
    slug: String,
    base_url: String,
}

impl CapterraSource {
    pub fn new(company: &str) -> Self {
        Self::with_base_url(company, CAPTERRA_BASE_URL)
    }

    pub fn with_base_url(company: &str, base_url: &str) -> Self {
        Self {
            company: company.to_string(),
            slug: company_slug(company),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ReviewSource for CapterraSource {
    fn platform(&self) -> Platform {
        Platform::Capterra
    }

    fn company(&self) -> &str {
        &self.company
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}/p/{}/reviews?page={}", self.base_url, self.slug, page)
    }

    fn parse_page(&self, html: &str, window: &PageWindow) -> ParsedPage {
        parse_cards(html, window, &CAPTERRA_LAYOUT, Platform::Capterra, &self.company)
    }
}
