extern crate regex;
extern crate scraper;

use super::{
    error::{Error, Kind, Result},
    Session,
};
use crate::{
    config::sample::{HEADING_DEPTH, INPUT_EN, INPUT_JA, OUTPUT_EN, OUTPUT_JA},
    types::Sample,
};
use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

fn space() -> Regex {
    Regex::new(r"\s+").expect("static regex must compile")
}

/// Heading prefixes that mark sample blocks on a problem page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    input: String,
    output: String,
    input_key: String,
    output_key: String,
}
impl Markers {
    pub fn japanese() -> Self {
        Self::new(INPUT_JA, OUTPUT_JA)
    }
    pub fn english() -> Self {
        Self::new(INPUT_EN, OUTPUT_EN)
    }
    pub fn new<I: Into<String>, O: Into<String>>(input: I, output: O) -> Self {
        let (input, output) = (input.into(), output.into());
        let space = space();
        Markers {
            input_key: space.replace_all(&input, "").into_owned(),
            output_key: space.replace_all(&output, "").into_owned(),
            input,
            output,
        }
    }
    fn matches(&self, heading: &str) -> bool {
        heading.starts_with(self.input.as_str()) || heading.starts_with(self.output.as_str())
    }
    fn input_key(&self, index: Option<usize>) -> String {
        key(&self.input_key, index)
    }
    fn output_key(&self, index: Option<usize>) -> String {
        key(&self.output_key, index)
    }
}
impl Default for Markers {
    fn default() -> Self {
        Self::japanese()
    }
}

fn key(marker: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{}{}", marker, i),
        None => marker.to_owned(),
    }
}

struct Patterns {
    pre: Selector,
    space: Regex,
}
impl Patterns {
    fn new() -> Self {
        Self {
            pre: Selector::parse("pre").expect("static selector must parse"),
            space: space(),
        }
    }
}

/// Returns the `h3` child of the nearest of the first `depth` ancestors of
/// `block` that has one.
fn find_heading(block: ElementRef<'_>, depth: usize) -> Option<String> {
    block
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(depth)
        .find_map(|ancestor| {
            ancestor
                .children()
                .filter_map(ElementRef::wrap)
                .find(|child| child.value().name() == "h3")
        })
        .map(|heading| heading.text().collect::<String>().trim().to_owned())
}

/// Maps each sample heading, with whitespace removed, to the text of its
/// preformatted block.
pub fn extract_elements(body: &str, markers: &Markers) -> HashMap<String, String> {
    let patterns = Patterns::new();
    let document = Html::parse_document(body);
    let mut elements = HashMap::new();
    for block in document.select(&patterns.pre) {
        match find_heading(block, HEADING_DEPTH) {
            Some(heading) if markers.matches(&heading) => {
                elements.insert(
                    patterns.space.replace_all(&heading, "").into_owned(),
                    block.text().collect::<String>(),
                );
            }
            _ => {}
        }
    }
    elements
}

/// Turns extracted elements into an ordered list of samples.
///
/// Pages with a single sample label it without a number, pages with more
/// number them from 1.
pub fn pair_samples(elements: &HashMap<String, String>, markers: &Markers) -> Result<Vec<Sample>> {
    if elements.is_empty() {
        return Err(Error::with_kind(Kind::NoSamples));
    }
    if elements.len() % 2 != 0 {
        return Err(Error::with_kind(Kind::UnbalancedSamples(elements.len())));
    }
    let count = elements.len() / 2;

    if count == 1 {
        if let (Some(input), Some(output)) = (
            elements.get(&markers.input_key(None)),
            elements.get(&markers.output_key(None)),
        ) {
            return Ok(vec![Sample::new(input.as_str(), output.as_str())]);
        }
    }

    (1..=count)
        .map(|i| {
            let lookup = |key: String| {
                elements
                    .get(&key)
                    .ok_or_else(|| Error::with_kind(Kind::MissingSampleKey(key)))
            };
            let input = lookup(markers.input_key(Some(i)))?;
            let output = lookup(markers.output_key(Some(i)))?;
            Ok(Sample::new(input.as_str(), output.as_str()))
        })
        .collect()
}

impl Session {
    pub async fn fetch_samples(&self, problem_url: &str, markers: &Markers) -> Result<Vec<Sample>> {
        let body = self.fetch(problem_url).await?;
        let elements = extract_elements(&body, markers);
        debug!("found {} sample blocks in {}", elements.len(), problem_url);
        pair_samples(&elements, markers)
    }
}
