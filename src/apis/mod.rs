//! Platform adapters for review listing pages.
//!
//! Each adapter is a selector table plus URL layout; the card walk, field
//! extraction and date-window filtering are shared by [`parse_cards`].

pub mod capterra;
pub mod g2;

pub use capterra::CapterraSource;
pub use g2::G2Source;

use crate::config::PlatformSettings;
use crate::error::{Result, ScraperError};
use crate::types::{DatePosition, PageWindow, ParsedPage, Platform, ReviewRecord, ReviewSource};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

/// Build the adapter for `platform`, bound to `company`
pub fn create_source(
    platform: Platform,
    company: &str,
    settings: &PlatformSettings,
) -> Box<dyn ReviewSource> {
    match platform {
        Platform::G2 => Box::new(G2Source::with_base_url(company, &settings.g2_base_url)),
        Platform::Capterra => Box::new(CapterraSource::with_base_url(
            company,
            &settings.capterra_base_url,
        )),
    }
}

/// URL path segment for a company, e.g. "Acme Corp" -> "acme-corp"
pub fn company_slug(company: &str) -> String {
    company.trim().to_lowercase().replace(' ', "-")
}

/// Where the numeric rating lives inside a card
pub(crate) enum RatingField {
    /// Element text is the number, e.g. `<span>4.5</span>`
    Text,
    /// First whitespace token of an attribute, e.g. `aria-label="4.5 out of 5"`
    AttrLeadingToken(&'static str),
}

/// Per-platform selector table
pub(crate) struct CardLayout {
    pub card: Selector,
    pub title: Selector,
    pub body: Selector,
    pub rating: Selector,
    pub rating_field: RatingField,
    /// Element carrying the review timestamp in its `datetime` attribute
    pub date: Selector,
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector '{css}': {e}"))
}

/// Walk the review cards of one page in document order.
///
/// Listings are newest first, so the first card dated before the window start
/// ends the scan and flags the boundary. Cards newer than the window end are
/// skipped. Undated cards are kept. A card that fails to parse is logged and
/// skipped without affecting its neighbours.
pub(crate) fn parse_cards(
    html: &str,
    window: &PageWindow,
    layout: &CardLayout,
    platform: Platform,
    company: &str,
) -> ParsedPage {
    let document = Html::parse_document(html);
    let mut page = ParsedPage::default();

    for card in document.select(&layout.card) {
        page.cards_seen += 1;

        let record = match extract_card(card, layout, platform, company) {
            Ok(record) => record,
            Err(e) => {
                warn!(%platform, card = page.cards_seen, "Failed to parse a review block: {}", e);
                continue;
            }
        };

        if let Some(review_date) = record.review_date {
            match window.position(review_date) {
                DatePosition::BeforeStart => {
                    info!(%platform, %review_date, "Reached reviews older than start date. Stopping.");
                    page.boundary_reached = true;
                    break;
                }
                DatePosition::AfterEnd => {
                    debug!(%platform, %review_date, "Skipping review newer than end date");
                    continue;
                }
                DatePosition::Within => {}
            }
        }

        page.records.push(record);
    }

    debug!(
        %platform,
        cards = page.cards_seen,
        kept = page.records.len(),
        boundary = page.boundary_reached,
        "Parsed listing page"
    );
    page
}

fn extract_card(
    card: ElementRef<'_>,
    layout: &CardLayout,
    platform: Platform,
    company: &str,
) -> Result<ReviewRecord> {
    let title = card.select(&layout.title).next().and_then(element_text);
    let body = card.select(&layout.body).next().and_then(element_text);

    let rating = match card.select(&layout.rating).next() {
        Some(el) => extract_rating(el, &layout.rating_field)?,
        None => None,
    };

    let review_date = card
        .select(&layout.date)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .map(parse_review_date)
        .transpose()?;

    Ok(ReviewRecord {
        source: platform,
        company: company.to_string(),
        title,
        body,
        rating,
        review_date,
    })
}

fn extract_rating(el: ElementRef<'_>, field: &RatingField) -> Result<Option<f64>> {
    let raw = match field {
        RatingField::Text => element_text(el),
        RatingField::AttrLeadingToken(attr) => el
            .value()
            .attr(attr)
            .and_then(|v| v.split_whitespace().next())
            .map(str::to_string),
    };
    match raw {
        Some(text) => match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            Ok(_) => Err(ScraperError::MalformedElement(format!(
                "rating '{text}' is not a finite number"
            ))),
            Err(e) => Err(ScraperError::MalformedElement(format!("rating '{text}': {e}"))),
        },
        // Rating element present but without a value: treat like a missing field
        None => Ok(None),
    }
}

/// All descendant text with whitespace collapsed; `None` when blank
pub(crate) fn element_text(el: ElementRef<'_>) -> Option<String> {
    let text = el.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse a `datetime` attribute value as a UTC-naive timestamp.
///
/// A trailing `Z` is dropped. Explicit offsets are converted to UTC. Bare
/// dates map to midnight.
pub(crate) fn parse_review_date(raw: &str) -> Result<NaiveDateTime> {
    let value = raw.trim();
    let naive = value.strip_suffix('Z').unwrap_or(value);

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(parsed);
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight);
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_utc());
    }

    Err(ScraperError::MalformedElement(format!("review date '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_slug() {
        assert_eq!(company_slug("Chargebee"), "chargebee");
        assert_eq!(company_slug("Acme Corp"), "acme-corp");
        assert_eq!(company_slug("  Zoho CRM "), "zoho-crm");
    }

    #[test]
    fn test_parse_review_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 20)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(parse_review_date("2024-01-20T08:30:00Z").unwrap(), expected);
        assert_eq!(parse_review_date("2024-01-20T08:30:00").unwrap(), expected);
        assert_eq!(parse_review_date("2024-01-20 08:30:00").unwrap(), expected);
        assert_eq!(parse_review_date("2024-01-20T08:30:00.000Z").unwrap(), expected);
        assert_eq!(parse_review_date("2024-01-20T10:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_review_date("2024-01-20T08:30").unwrap(), expected);
        assert_eq!(parse_review_date("2024-01-20T03:30:00-05:00").unwrap(), expected);
        assert_eq!(
            parse_review_date("2024-01-20").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_review_date_rejects_garbage() {
        let err = parse_review_date("last Tuesday").unwrap_err();
        assert!(matches!(err, ScraperError::MalformedElement(_)));
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let html = Html::parse_fragment("<p>  Works \n  <b>really</b>   well </p><h3>   </h3>");
        let p = html.select(&selector("p")).next().unwrap();
        assert_eq!(element_text(p).as_deref(), Some("Works really well"));
        let h3 = html.select(&selector("h3")).next().unwrap();
        assert_eq!(element_text(h3), None);
    }
}
