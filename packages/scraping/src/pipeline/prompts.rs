//! Model prompt for characteristic extraction.

/// Fields the extractor asks the model to fill, in order.
pub const CHARACTERISTIC_FIELDS: [&str; 6] = [
    "Altitude",
    "Origin",
    "Flavor Profile",
    "Roast Level",
    "Processing Method",
    "Notes",
];

/// Output layout embedded in the prompt.
pub const CHARACTERISTICS_TEMPLATE: &str = r#"Altitude: <growing altitude in meters above sea level>
Origin: <country, region and farm>
Flavor Profile: <tasting notes>
Roast Level: <light, medium or dark>
Processing Method: <washed, natural, honey or other>
Notes: <anything else relevant to the coffee>"#;

/// Instruction sent to the summarization model.
pub const EXTRACT_CHARACTERISTICS_PROMPT: &str = r#"Extract the characteristics of the coffee "{item_name}" from the product description below.
Answer using exactly this template and leave a field empty when the description does not mention it:

{template}

Product description:
{content}"#;

/// Build the extraction prompt for one product.
///
/// Placeholders are filled in a single pass over the template, so braces in
/// the item name or the description are copied through literally.
pub fn build_extraction_prompt(item_name: &str, content: &str) -> String {
    fill_placeholders(
        EXTRACT_CHARACTERISTICS_PROMPT,
        &[
            ("{item_name}", item_name),
            ("{template}", CHARACTERISTICS_TEMPLATE),
            ("{content}", content),
        ],
    )
}

fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_name_fields_and_text() {
        let prompt = build_extraction_prompt("Finca La Esperanza", "Grown at 1800 m in Huila.");
        assert!(prompt.contains("\"Finca La Esperanza\""));
        assert!(prompt.ends_with("Grown at 1800 m in Huila."));
        for field in CHARACTERISTIC_FIELDS {
            assert!(prompt.contains(&format!("{}:", field)), "missing {}", field);
        }
    }

    #[test]
    fn test_content_placeholders_are_not_expanded() {
        let prompt = build_extraction_prompt("Geisha", "literal {item_name} and {template}");
        assert!(prompt.ends_with("literal {item_name} and {template}"));
    }

    #[test]
    fn test_item_name_placeholders_are_not_expanded() {
        let prompt = build_extraction_prompt("Blend {content} {template}", "BODY");
        assert_eq!(prompt.matches("BODY").count(), 1);
        assert_eq!(prompt.matches("Roast Level:").count(), 1);
        assert!(prompt.contains("\"Blend {content} {template}\""));
        assert!(prompt.ends_with("BODY"));
    }
}
