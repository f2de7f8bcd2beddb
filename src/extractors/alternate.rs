//! Legacy `li.cntanr` template with glyph-obfuscated phone numbers.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{dom, glyph, links, ExtractContext, ListingStrategy};
use crate::error::BlockError;
use crate::lead::{unknown_address, Lead};
use crate::phone;

const BLOCK: &str = "li.cntanr";
const NAME: &str = "span.jcn a, span.jcn, .lng_cont_name";
const ADDRESS: &str = "span.cont_fl_addr, span.mrehover, .adrstxtr";
const PHONE_CONTAINER: &str = "p.contact-info, .contact-info";
const MARKER: &str = "span[class]";
const RATING: &str = "span.green-box";

struct Selectors {
    block: Selector,
    name: Selector,
    address: Selector,
    phone_container: Selector,
    marker: Selector,
    rating: Selector,
}

impl Selectors {
    fn compile() -> Option<Self> {
        Some(Self {
            block: dom::selector(BLOCK)?,
            name: dom::selector(NAME)?,
            address: dom::selector(ADDRESS)?,
            phone_container: dom::selector(PHONE_CONTAINER)?,
            marker: dom::selector(MARKER)?,
            rating: dom::selector(RATING)?,
        })
    }
}

/// Secondary strategy for the alternate listing template.
pub struct AlternateTemplate;

impl ListingStrategy for AlternateTemplate {
    fn name(&self) -> &'static str {
        "alternate"
    }

    fn extract(&self, document: &Html, ctx: &ExtractContext<'_>) -> Vec<Lead> {
        let Some(sel) = Selectors::compile() else {
            return Vec::new();
        };

        document
            .select(&sel.block)
            .filter_map(|block| match parse_block(block, &sel, ctx) {
                Ok(lead) => Some(lead),
                Err(e) => {
                    debug!(error = %e, "Skipping alternate-template block");
                    None
                }
            })
            .collect()
    }
}

fn parse_block(
    block: ElementRef<'_>,
    sel: &Selectors,
    ctx: &ExtractContext<'_>,
) -> Result<Lead, BlockError> {
    let name = dom::first_text(block, &sel.name)
        .or_else(|| dom::first_attr(block, &sel.name, "title"))
        .ok_or(BlockError::MissingName)?;

    let address =
        dom::first_text(block, &sel.address).unwrap_or_else(|| unknown_address(ctx.location));

    let mut lead = Lead::new(name, decode_phone(block, sel), address).with_category(ctx.category);
    if let Some(rating) = dom::first_text(block, &sel.rating) {
        lead = lead.with_rating(rating);
    }
    if let Some(website) = links::find_website(block) {
        lead = lead.with_website(website);
    }
    Ok(lead)
}

/// Digits from the glyph markers of the first phone container, canonical when
/// at least ten were recovered.
fn decode_phone(block: ElementRef<'_>, sel: &Selectors) -> String {
    let Some(container) = block.select(&sel.phone_container).next() else {
        return String::new();
    };

    let digits = glyph::decode_markers(
        container
            .select(&sel.marker)
            .map(|marker| marker.value().classes()),
    );

    if digits.len() >= 10 {
        if let Some(canonical) = phone::canonical_from_digits(&digits[..10]) {
            return canonical;
        }
    }
    digits
}
