//! Product listing discovery.
//!
//! Works on static markup: the listing region is `<main>` (else `<body>`),
//! products are list items, and each item needs a link and a name heading.

use scraper::{ElementRef, Html};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{PipelineError, Result};
use crate::pipeline::normalize::{first_match, selector};
use crate::types::product::ProductLink;

/// Find product names and absolute links on a listing page.
///
/// When the region holds several `<ul>` lists only the first is used;
/// otherwise every `<li>` in the region is a candidate. Items without a
/// link or a name are skipped.
pub fn discover_products(html: &str, base_url: &str) -> Result<Vec<ProductLink>> {
    let base = Url::parse(base_url)
        .map_err(|e| PipelineError::Config(format!("invalid listing URL {}: {}", base_url, e)))?;
    let document = Html::parse_document(html);

    let region = match first_match(&document, "main")? {
        Some(main) => main,
        None => first_match(&document, "body")?
            .ok_or_else(|| PipelineError::structural("listing has neither <main> nor <body>"))?,
    };

    let ul = selector("ul")?;
    let li = selector("li")?;
    let lists: Vec<ElementRef<'_>> = region.select(&ul).collect();
    info!(lists = lists.len(), "scanning product listing");

    let items: Vec<ElementRef<'_>> = if lists.len() > 1 {
        lists[0].select(&li).collect()
    } else {
        region.select(&li).collect()
    };

    let link = selector("a[href]")?;
    let h3 = selector("h3")?;
    let p = selector("p")?;

    let mut products = Vec::new();
    for item in items {
        let Some(href) = item.select(&link).next().and_then(|a| a.value().attr("href")) else {
            warn!("list item has no link, skipping");
            continue;
        };
        let href = match base.join(href.trim()) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(href = %href, error = %e, "unresolvable product link, skipping");
                continue;
            }
        };

        let mut headings: Vec<String> = item.select(&h3).map(element_text).collect();
        if headings.is_empty() {
            headings = item.select(&p).map(element_text).collect();
        }

        let name = match headings.len() {
            0 => {
                debug!(href = %href, "list item has no name, skipping");
                continue;
            }
            1 => headings.swap_remove(0),
            _ if !headings[0].is_empty() => headings.swap_remove(0),
            _ => headings.swap_remove(1),
        };

        debug!(name = %name, href = %href, "product found");
        products.push(ProductLink::new(name, href));
    }

    info!(products = products.len(), "listing discovery complete");
    Ok(products)
}

/// Whitespace-collapsed text content.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://tostadores.example.com/cafes/";

    #[test]
    fn test_first_list_of_many() {
        let html = r#"<html><body><main>
            <ul>
                <li><a href="/cafe/huila"><h3>Huila</h3></a></li>
                <li><a href="nariño"><h3>Nariño</h3></a></li>
            </ul>
            <ul><li><a href="/blog"><h3>Blog</h3></a></li></ul>
        </main></body></html>"#;

        let products = discover_products(html, BASE).unwrap();
        assert_eq!(
            products,
            vec![
                ProductLink::new("Huila", "https://tostadores.example.com/cafe/huila"),
                ProductLink::new("Nariño", "https://tostadores.example.com/cafes/nari%C3%B1o"),
            ]
        );
    }

    #[test]
    fn test_single_list_uses_every_item_in_region() {
        let html = r#"<html><body>
            <nav><a href="/ignored">outside main</a></nav>
            <main><ul>
                <li><a href="/a"><h3>Uno</h3></a></li>
            </ul><ol><li><a href="/b"><p>Dos</p></a></li></ol></main>
        </body></html>"#;

        let names: Vec<String> = discover_products(html, BASE)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Uno", "Dos"]);
    }

    #[test]
    fn test_name_fallbacks() {
        let html = r#"<html><body><ul>
            <li><a href="/1"></a><p>Precio</p><p>Etiopía</p></li>
            <li><a href="/2"></a><h3></h3><h3>Geisha</h3></li>
            <li><a href="/3"></a><h3>  Bourbon   rosado </h3></li>
            <li><a href="/4"></a><span>sin nombre</span></li>
            <li><h3>Sin enlace</h3></li>
        </ul></body></html>"#;

        let names: Vec<String> = discover_products(html, BASE)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Precio", "Geisha", "Bourbon rosado"]);
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = discover_products("<html></html>", "not a url").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
