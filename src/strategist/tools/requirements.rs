//! Rule-based requirement extraction from raw brief text.

use regex::Regex;

use crate::config::{ConfigError, ExtractionConfig};
use crate::models::Requirements;

/// Pulls product, audience and research keywords out of raw text.
///
/// Matching is done on the lower-cased text: product and audience come from
/// lines starting with one of the configured prefixes (the last matching line
/// wins), keywords from the first `keywords:`/`tags:` marker anywhere in the text.
#[derive(Debug, Clone)]
pub struct RequirementExtractor {
    product_prefixes: Vec<String>,
    audience_prefixes: Vec<String>,
    keywords_pattern: Option<Regex>,
}

impl RequirementExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let lowered = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };

        let markers: Vec<String> = lowered(config.keyword_markers.as_slice())
            .iter()
            .map(|m| regex::escape(m))
            .collect();
        let keywords_pattern = if markers.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("({})(.*)", markers.join("|")))?)
        };

        Ok(Self {
            product_prefixes: lowered(config.product_prefixes.as_slice()),
            audience_prefixes: lowered(config.audience_prefixes.as_slice()),
            keywords_pattern,
        })
    }

    pub fn extract(&self, raw_text: &str) -> Requirements {
        tracing::debug!("Starting requirement extraction from raw text");
        let processed = raw_text.to_lowercase();
        let processed = processed.trim();

        let mut product = None;
        let mut audience = None;

        for line in processed.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(value) = strip_any_prefix(line, &self.product_prefixes) {
                let value = title_case(value);
                tracing::debug!("Product extracted: {}", value);
                product = Some(value);
            }
            if let Some(value) = strip_any_prefix(line, &self.audience_prefixes) {
                let value = title_case(value);
                tracing::debug!("Audience extracted: {}", value);
                audience = Some(value);
            }
        }

        let mut research_keywords: Vec<String> = self
            .keywords_pattern
            .as_ref()
            .and_then(|pattern| pattern.captures(processed))
            .map(|caps| {
                caps[2]
                    .split(',')
                    .map(str::trim)
                    .filter(|kw| !kw.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if research_keywords.is_empty() {
            if let Some(fallback) = product.as_ref().or(audience.as_ref()) {
                research_keywords.push(fallback.clone());
            }
        }

        if product.is_none() && audience.is_none() {
            tracing::warn!("Could not extract main product or audience from the text");
        }

        let requirements = Requirements {
            product,
            audience,
            research_keywords,
        };
        tracing::info!(?requirements, "Requirement extraction finished");
        requirements
    }
}

/// Remainder of `line` after the first matching prefix. Only the leading prefix
/// is removed; a prefix line with nothing after it yields `None`.
fn strip_any_prefix<'a>(line: &'a str, prefixes: &[String]) -> Option<&'a str> {
    prefixes
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix.as_str()))
        .map(str::trim)
        .filter(|rest| !rest.is_empty())
}

/// Title-case a string: letters following a non-letter are upper-cased, all
/// other letters lower-cased (`"ai-powered 3d tool"` becomes `"Ai-Powered 3D Tool"`).
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RequirementExtractor {
        RequirementExtractor::new(&ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn title_case_handles_separators_and_digits() {
        assert_eq!(title_case("ai-powered 3d tool"), "Ai-Powered 3D Tool");
        assert_eq!(title_case("it's"), "It'S");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn longer_prefixes_are_recognised() {
        let reqs = extractor().extract("Product Name: Super App\nTarget Audience: Students");
        assert_eq!(reqs.product.as_deref(), Some("Super App"));
        assert_eq!(reqs.audience.as_deref(), Some("Students"));
    }

    #[test]
    fn later_lines_override_earlier_ones() {
        let reqs = extractor().extract("tool: first\nsoftware: second");
        assert_eq!(reqs.product.as_deref(), Some("Second"));
    }

    #[test]
    fn prefix_must_start_the_line() {
        let reqs = extractor().extract("our product: widget");
        assert!(reqs.product.is_none());
    }

    #[test]
    fn only_the_leading_prefix_is_stripped() {
        let reqs = extractor().extract("tool: power tool: x");
        assert_eq!(reqs.product.as_deref(), Some("Power Tool: X"));
    }

    #[test]
    fn empty_prefix_line_is_not_a_value() {
        let reqs = extractor().extract("product:\naudience:   ");
        assert!(reqs.product.is_none());
        assert!(reqs.audience.is_none());
    }

    #[test]
    fn keywords_marker_may_appear_mid_line() {
        let reqs = extractor().extract("Posts should use tags: ai , , video");
        assert_eq!(reqs.research_keywords, vec!["ai", "video"]);
    }

    #[test]
    fn only_first_keywords_line_counts() {
        let reqs = extractor().extract("keywords: one\ntags: two");
        assert_eq!(reqs.research_keywords, vec!["one"]);
    }

    #[test]
    fn audience_is_fallback_keyword_when_no_product() {
        let reqs = extractor().extract("Demographic: busy parents");
        assert_eq!(reqs.research_keywords, vec!["Busy Parents"]);
    }

    #[test]
    fn configured_markers_replace_defaults() {
        let config = ExtractionConfig {
            keyword_markers: vec!["Hashtags:".to_string()],
            ..ExtractionConfig::default()
        };
        let reqs = RequirementExtractor::new(&config)
            .unwrap()
            .extract("hashtags: x, y\nkeywords: z");
        assert_eq!(reqs.research_keywords, vec!["x", "y"]);
    }

    #[test]
    fn no_markers_never_match() {
        let config = ExtractionConfig {
            keyword_markers: vec![],
            ..ExtractionConfig::default()
        };
        let reqs = RequirementExtractor::new(&config)
            .unwrap()
            .extract("keywords: a, b");
        assert!(reqs.research_keywords.is_empty());
    }
}
