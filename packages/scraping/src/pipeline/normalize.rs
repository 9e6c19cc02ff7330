//! Content normalization - markup to visible text.
//!
//! Chrome elements are dropped by skipping their subtrees during the walk,
//! so text on either side of a stripped element is never spliced together.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::types::config::NormalizerConfig;
use crate::types::page::{NormalizedContent, UNKNOWN_LANGUAGE};

/// Parse `html`, detect its declared language and extract the visible text
/// of its primary content region.
///
/// Fails with [`PipelineError::Structural`] when the region is missing (and
/// required) or contains no text.
pub fn normalize(html: &str, config: &NormalizerConfig) -> Result<NormalizedContent> {
    let document = Html::parse_document(html);

    let detected_language = declared_language(&document);
    let region = primary_region(&document, config)?;

    let mut parts = Vec::new();
    collect_text(region, config, &mut parts);

    if parts.is_empty() {
        return Err(PipelineError::structural(format!(
            "<{}> contains no visible text",
            region.value().name()
        )));
    }

    debug!(
        language = %detected_language,
        text_nodes = parts.len(),
        "normalized page"
    );

    Ok(NormalizedContent {
        detected_language,
        body_text: parts.join("\n"),
    })
}

/// `lang` attribute of the root element, or [`UNKNOWN_LANGUAGE`].
pub(crate) fn declared_language(document: &Html) -> String {
    document
        .root_element()
        .value()
        .attr("lang")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(UNKNOWN_LANGUAGE)
        .to_string()
}

fn primary_region<'a>(document: &'a Html, config: &NormalizerConfig) -> Result<ElementRef<'a>> {
    if let Some(main) = first_match(document, "main")? {
        return Ok(main);
    }

    if config.require_primary_container {
        return Err(PipelineError::structural("page has no <main> element"));
    }

    debug!("no <main> element, falling back to <body>");
    Ok(first_match(document, "body")?.unwrap_or_else(|| document.root_element()))
}

pub(crate) fn first_match<'a>(document: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = selector(css)?;
    Ok(document.select(&selector).next())
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| PipelineError::Config(format!("invalid selector {:?}: {:?}", css, e)))
}

fn collect_text(element: ElementRef<'_>, config: &NormalizerConfig, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !config.is_stripped(child_element.value().name()) {
                collect_text(child_element, config, out);
            }
        }
    }
}
