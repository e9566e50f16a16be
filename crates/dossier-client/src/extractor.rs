//! Profile extraction from directory page markup.
//!
//! Every field is read through its own structural anchor (a CSS selector)
//! and degrades to empty/absent on its own when the anchor is missing, so a
//! partially rendered page still yields a record. The selector strings are
//! the compatibility contract with the directory's markup.

use std::sync::Arc;

use dossier_core::error::AppError;
use dossier_core::models::{Founder, Job, LaunchPost, ProfileRecord};
use dossier_core::traits::ProfileExtractor;
use scraper::{ElementRef, Html, Selector};

const NAME_SELECTOR: &str = "h1";
const DESCRIPTION_SELECTOR: &str = "div.prose.max-w-full h3";
const FACT_LABEL_SELECTOR: &str = "div.flex.flex-row.justify-between span";
const JOB_COUNT_SELECTOR: &str = "span.ycdc-badge.ml-0.font-bold.no-underline";

const FOUNDER_BLOCK_SELECTOR: &str = "div.leading-snug";
const FOUNDER_NAME_SELECTOR: &str = "div.font-bold";
const LINKEDIN_SELECTOR: &str = r#"a[title="LinkedIn profile"]"#;
const TWITTER_SELECTOR: &str = r#"a[title="Twitter account"]"#;

const JOB_ROW_SELECTOR: &str = "div.flex.w-full.flex-row.justify-between.py-4";
const JOB_ROLE_SELECTOR: &str = "div.ycdc-with-link-color.pr-4.text-lg.font-bold a";
const JOB_LOCATION_SELECTOR: &str =
    "div.justify-left.flex.flex-row.gap-x-7 div.list-item.list-square.capitalize";

const LAUNCH_POST_SELECTOR: &str = r"div.prose.max-w-full.prose-h2\:mt-0";
const LAUNCH_TITLE_SELECTOR: &str = "a.ycdc-with-link-color.mb-4.mt-0.text-xl.underline h3";

// Labels of the key/value facts panel
const FOUNDED_LABEL: &str = "Founded:";
const TEAM_SIZE_LABEL: &str = "Team Size";
const LOCATION_LABEL: &str = "Location";

/// Compiled selectors, built once per extractor.
struct ProfileSelectors {
    name: Selector,
    description: Selector,
    fact_label: Selector,
    job_count: Selector,
    founder_block: Selector,
    founder_name: Selector,
    linkedin: Selector,
    twitter: Selector,
    job_row: Selector,
    job_role: Selector,
    job_location: Selector,
    launch_post: Selector,
    launch_title: Selector,
}

impl ProfileSelectors {
    fn compile() -> Result<Self, AppError> {
        Ok(Self {
            name: compile(NAME_SELECTOR)?,
            description: compile(DESCRIPTION_SELECTOR)?,
            fact_label: compile(FACT_LABEL_SELECTOR)?,
            job_count: compile(JOB_COUNT_SELECTOR)?,
            founder_block: compile(FOUNDER_BLOCK_SELECTOR)?,
            founder_name: compile(FOUNDER_NAME_SELECTOR)?,
            linkedin: compile(LINKEDIN_SELECTOR)?,
            twitter: compile(TWITTER_SELECTOR)?,
            job_row: compile(JOB_ROW_SELECTOR)?,
            job_role: compile(JOB_ROLE_SELECTOR)?,
            job_location: compile(JOB_LOCATION_SELECTOR)?,
            launch_post: compile(LAUNCH_POST_SELECTOR)?,
            launch_title: compile(LAUNCH_TITLE_SELECTOR)?,
        })
    }
}

fn compile(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css)
        .map_err(|e| AppError::ExtractionError(format!("invalid selector '{css}': {e}")))
}

/// HTML profile extractor using scraper.
pub struct ScraperExtractor {
    selectors: Arc<ProfileSelectors>,
}

impl Clone for ScraperExtractor {
    fn clone(&self) -> Self {
        Self {
            selectors: Arc::clone(&self.selectors),
        }
    }
}

impl ScraperExtractor {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            selectors: Arc::new(ProfileSelectors::compile()?),
        })
    }

    /// Map a parsed document into a record. Pure; never fails.
    pub fn extract_document(&self, document: &Html) -> ProfileRecord {
        let s = &self.selectors;
        let root = document.root_element();

        ProfileRecord {
            name: first_text(root, &s.name).unwrap_or_default(),
            description: first_text(root, &s.description).unwrap_or_default(),
            founded: self.fact(root, FOUNDED_LABEL).unwrap_or_default(),
            team_size: self
                .fact(root, TEAM_SIZE_LABEL)
                .and_then(|t| parse_leading_int(&t)),
            location: self.fact(root, LOCATION_LABEL).unwrap_or_default(),
            founders: self.founders(root),
            launch_posts: self.launch_posts(root),
            job_count: first_text(root, &s.job_count).and_then(|t| parse_leading_int(&t)),
            jobs: self.jobs(root),
        }
    }

    /// Value span immediately following the facts-panel span labelled `label`.
    fn fact(&self, root: ElementRef<'_>, label: &str) -> Option<String> {
        root.select(&self.selectors.fact_label)
            .filter(|span| raw_text(*span).contains(label))
            .filter_map(next_sibling_element)
            .find(|value| value.value().name() == "span")
            .map(element_text)
    }

    fn founders(&self, root: ElementRef<'_>) -> Vec<Founder> {
        let s = &self.selectors;
        root.select(&s.founder_block)
            .map(|block| Founder {
                name: first_text(block, &s.founder_name).unwrap_or_default(),
                linked_in_url: first_attr(block, &s.linkedin, "href"),
                twitter_url: first_attr(block, &s.twitter, "href"),
            })
            .collect()
    }

    /// Rows missing either the role link or a location are skipped.
    fn jobs(&self, root: ElementRef<'_>) -> Vec<Job> {
        let s = &self.selectors;
        root.select(&s.job_row)
            .filter_map(|row| {
                let role = row.select(&s.job_role).next()?;
                let location = row.select(&s.job_location).next()?;
                Some(Job {
                    role: element_text(role),
                    location: element_text(location),
                })
            })
            .collect()
    }

    /// Posts whose title has no enclosing link target are skipped.
    fn launch_posts(&self, root: ElementRef<'_>) -> Vec<LaunchPost> {
        let s = &self.selectors;
        root.select(&s.launch_post)
            .filter_map(|block| {
                let title = block.select(&s.launch_title).next()?;
                let url = enclosing_anchor(title)?
                    .value()
                    .attr("href")
                    .map(str::trim)
                    .filter(|href| !href.is_empty())?;
                Some(LaunchPost {
                    title: element_text(title),
                    url: url.to_string(),
                })
            })
            .collect()
    }
}

impl ProfileExtractor for ScraperExtractor {
    fn extract(&self, html: &str) -> Result<ProfileRecord, AppError> {
        let document = Html::parse_document(html);
        Ok(self.extract_document(&document))
    }
}

// ---------------------------------------------------------------------------
// Node accessors
// ---------------------------------------------------------------------------

fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    raw_text(element).trim().to_string()
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

fn first_attr(scope: ElementRef<'_>, selector: &Selector, name: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|e| e.value().attr(name))
        .map(str::to_string)
}

/// Next sibling that is an element, skipping text and comment nodes.
fn next_sibling_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn enclosing_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "a")
}

/// Parse the leading integer of `text`: optional sign, then decimal digits.
///
/// `"12 jobs"` → `Some(12)`, `"n/a"` → `None`, `""` → `None`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
