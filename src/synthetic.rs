//! Synthetic lead generation
//!
//! Guaranteed fallback when live extraction fails or finds nothing. Output
//! shape is fixed (10 to 20 records, canonical phones, category echoed back);
//! content is random. All randomness is drawn from the caller's [`Rng`], so a
//! seeded generator reproduces a lead set exactly.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::lead::Lead;
use crate::phone;

pub const MIN_LEADS: usize = 10;
pub const MAX_LEADS: usize = 20;

const GENERIC_SUFFIXES: &[&str] = &["Business"];

/// (category keywords, business-type suffixes). First keyword hit wins.
const BUSINESS_TYPES: &[(&[&str], &[&str])] = &[
    (
        &["restaurant", "food", "cafe", "dining"],
        &["Restaurant", "Café", "Bistro", "Diner", "Eatery"],
    ),
    (
        &["hotel", "lodging", "resort"],
        &["Hotel", "Resort", "Inn", "Suites", "Lodging"],
    ),
    (
        &["doctor", "clinic", "hospital", "medical"],
        &["Clinic", "Medical Center", "Hospital", "Specialist", "Practice"],
    ),
    (
        &["plumb"],
        &[
            "Plumbing Service",
            "Pipe Specialist",
            "Water Systems",
            "Drainage Experts",
            "Plumbing Repairs",
        ],
    ),
    (
        &["electric"],
        &[
            "Electrical Service",
            "Power Systems",
            "Wiring Specialist",
            "Electrical Repairs",
            "Installation Expert",
        ],
    ),
];

/// Real business names keyed by lower-cased category, then location.
const CURATED: &[(&str, &[(&str, &[&str])])] = &[
    (
        "restaurants",
        &[
            (
                "mumbai",
                &[
                    "Leopold Cafe",
                    "Britannia & Co.",
                    "Trishna",
                    "Cafe Mondegar",
                    "Mahesh Lunch Home",
                    "Swati Snacks",
                    "Gajalee",
                    "Bademiya",
                ],
            ),
            (
                "delhi",
                &["Karim's", "Bukhara", "Indian Accent", "Moti Mahal", "Saravana Bhavan"],
            ),
            (
                "bangalore",
                &["MTR", "Vidyarthi Bhavan", "Koshy's", "Karavalli", "Truffles"],
            ),
        ],
    ),
    (
        "hotels",
        &[
            (
                "mumbai",
                &[
                    "The Taj Mahal Palace",
                    "The Oberoi",
                    "Trident Nariman Point",
                    "ITC Maratha",
                ],
            ),
            (
                "bangalore",
                &["The Leela Palace", "Taj West End", "ITC Gardenia", "The Oberoi Bengaluru"],
            ),
        ],
    ),
];

/// Valid leading pairs for Indian mobile numbers.
const MOBILE_PREFIXES: &[&str] = &[
    "70", "72", "73", "74", "75", "76", "77", "78", "79", "80", "81", "82", "83", "84", "85",
    "86", "87", "88", "89", "90", "91", "92", "93", "94", "95", "96", "97", "98", "99",
];

const STREETS: &[&str] = &[
    "Main Street",
    "Park Avenue",
    "Oak Road",
    "Maple Lane",
    "Market Street",
    "Broadway",
    "River Road",
    "Highland Avenue",
];

const PUBLIC_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "rediffmail.com",
];

/// Overall: `info@` 0.49, public-domain address 0.21, no email 0.3.
const EMAIL_PROBABILITY: f64 = 0.7;
const BUSINESS_EMAIL_PROBABILITY: f64 = 0.7;
const WEBSITE_PROBABILITY: f64 = 0.6;

/// Generate a synthetic lead set using thread-local randomness.
pub fn generate(category: &str, location: &str) -> Vec<Lead> {
    generate_with(category, location, &mut rand::thread_rng())
}

/// Generate a synthetic lead set drawing from `rng`.
pub fn generate_with<R: Rng + ?Sized>(category: &str, location: &str, rng: &mut R) -> Vec<Lead> {
    let target = rng.gen_range(MIN_LEADS..=MAX_LEADS);
    let suffixes = business_suffixes(category);
    let curated = curated_names(category, location);

    (1..=target)
        .map(|index| {
            let name = match curated.get(index - 1) {
                Some(name) => (*name).to_string(),
                None => {
                    let suffix = suffixes.choose(rng).copied().unwrap_or("Business");
                    format!("{} {} {}", location, suffix, index)
                }
            };
            synthesize(name, category, location, rng)
        })
        .collect()
}

/// Suffix table entry for `category`, generic when no keyword matches.
pub fn business_suffixes(category: &str) -> &'static [&'static str] {
    let lower = category.to_lowercase();
    BUSINESS_TYPES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, suffixes)| *suffixes)
        .unwrap_or(GENERIC_SUFFIXES)
}

/// Curated names for the exact (category, location) pair; empty when absent.
pub fn curated_names(category: &str, location: &str) -> &'static [&'static str] {
    let category = category.trim().to_lowercase();
    let location = location.trim().to_lowercase();
    CURATED
        .iter()
        .find(|(c, _)| *c == category)
        .and_then(|(_, locations)| locations.iter().find(|(l, _)| *l == location))
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

fn synthesize<R: Rng + ?Sized>(name: String, category: &str, location: &str, rng: &mut R) -> Lead {
    let slug = sanitize(&name);

    let street = STREETS.choose(rng).copied().unwrap_or("Main Street");
    let address = format!("{} {}, {}", rng.gen_range(1..=100), street, location);
    // tenths keep the value at exactly one decimal
    let rating = format!("{:.1}/5", f64::from(rng.gen_range(20u8..=50)) / 10.0);

    let mut lead = Lead::new(name, mobile_number(rng), address)
        .with_rating(rating)
        .with_category(category);

    if rng.gen_bool(EMAIL_PROBABILITY) {
        let email = if rng.gen_bool(BUSINESS_EMAIL_PROBABILITY) {
            format!("info@{}.com", slug)
        } else {
            let domain = PUBLIC_EMAIL_DOMAINS.choose(rng).copied().unwrap_or("gmail.com");
            format!("{}@{}", slug, domain)
        };
        lead = lead.with_email(email);
    }
    if rng.gen_bool(WEBSITE_PROBABILITY) {
        lead = lead.with_website(format!("https://www.{}.com", slug));
    }
    lead
}

fn mobile_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = MOBILE_PREFIXES.choose(rng).copied().unwrap_or("98");
    let digits = format!("{}{:08}", prefix, rng.gen_range(0..100_000_000u32));
    phone::canonical_from_digits(&digits).unwrap_or(digits)
}

/// Lower-cased ASCII alphanumerics of `name`, for email and domain parts.
fn sanitize(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if slug.is_empty() {
        "business".to_string()
    } else {
        slug
    }
}
