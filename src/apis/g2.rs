use crate::apis::{company_slug, parse_cards, selector, CardLayout, RatingField};
use crate::constants::G2_BASE_URL;
use crate::types::{PageWindow, ParsedPage, Platform, ReviewSource};
use once_cell::sync::Lazy;

static G2_LAYOUT: Lazy<CardLayout> = Lazy::new(|| CardLayout {
    card: selector("div.paper"),
    title: selector("h3"),
    body: selector("p"),
    rating: selector("span.fw-semibold"),
    rating_field: RatingField::Text,
    date: selector("time"),
});

/// Adapter for `g2.com/products/<slug>/reviews` listings
pub struct G2Source {
    company: String,
    slug: String,
    base_url: String,
}

impl G2Source {
    pub fn new(company: &str) -> Self {
        Self::with_base_url(company, G2_BASE_URL)
    }

    pub fn with_base_url(company: &str, base_url: &str) -> Self {
        Self {
            company: company.to_string(),
            slug: company_slug(company),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ReviewSource for G2Source {
    fn platform(&self) -> Platform {
        Platform::G2
    }

    fn company(&self) -> &str {
        &self.company
    }

    fn page_url(&self, page: u32) -> String {
        format!("{}/products/{}/reviews?page={}", self.base_url, self.slug, page)
    }

    fn parse_page(&self, html: &str, window: &PageWindow) -> ParsedPage {
        parse_cards(html, window, &G2_LAYOUT, Platform::G2, &self.company)
    }
}
