//! Result-box template (current site markup)
//!
//! Phone numbers live only in a data attribute on the call button; the
//! visible text is a "Show Number" label.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{dom, links, ExtractContext, ListingStrategy};
use crate::error::BlockError;
use crate::lead::{unknown_address, Lead};
use crate::phone;

const BLOCK: &str = "div.resultbox_info, div.resultbox";
const NAME: &str = "h2, h3, .resultbox_title_anchor";
const CONTACT: &str = "[data-phone], [data-tel]";
const CONTACT_ATTRS: &[&str] = &["data-phone", "data-tel"];
const ADDRESS: &str = ".resultbox_address, address";
const RATING: &str = ".resultbox_totalrate, .star_m";

struct Selectors {
    block: Selector,
    name: Selector,
    contact: Selector,
    address: Selector,
    rating: Selector,
}

impl Selectors {
    fn compile() -> Option<Self> {
        Some(Self {
            block: dom::selector(BLOCK)?,
            name: dom::selector(NAME)?,
            contact: dom::selector(CONTACT)?,
            address: dom::selector(ADDRESS)?,
            rating: dom::selector(RATING)?,
        })
    }
}

/// Primary strategy for the result-box listing template.
pub struct ResultBoxTemplate;

impl ListingStrategy for ResultBoxTemplate {
    fn name(&self) -> &'static str {
        "result-box"
    }

    fn extract(&self, document: &Html, ctx: &ExtractContext<'_>) -> Vec<Lead> {
        let Some(sel) = Selectors::compile() else {
            return Vec::new();
        };

        document
            .select(&sel.block)
            // nested match (div.resultbox > div.resultbox_info) is the same listing
            .filter(|block| !has_block_ancestor(*block, &sel.block))
            .filter_map(|block| match parse_block(block, &sel, ctx) {
                Ok(lead) => Some(lead),
                Err(e) => {
                    debug!(error = %e, "Skipping result-box block");
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
    let name = dom::first_text(block, &sel.name).ok_or(BlockError::MissingName)?;

    let phone = CONTACT_ATTRS
        .iter()
        .find_map(|attr| dom::first_attr(block, &sel.contact, attr))
        .map(|raw| phone::canonical_from_last_ten(&raw).unwrap_or(raw))
        .unwrap_or_default();

    let address =
        dom::first_text(block, &sel.address).unwrap_or_else(|| unknown_address(ctx.location));

    let mut lead = Lead::new(name, phone, address).with_category(ctx.category);
    if let Some(rating) = dom::first_text(block, &sel.rating) {
        lead = lead.with_rating(rating);
    }
    if let Some(website) = links::find_website(block) {
        lead = lead.with_website(website);
    }
    Ok(lead)
}

fn has_block_ancestor(element: ElementRef<'_>, block: &Selector) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| block.matches(&ancestor))
}
