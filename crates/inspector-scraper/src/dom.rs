//! Small helpers over `scraper` documents.
//!
//! `scraper::Html` is not `Send`; everything here is synchronous and callers
//! parse a fresh snapshot inside a non-async helper.

use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector, logging and discarding invalid ones.
pub(crate) fn sel(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(css, error = %e, "invalid css selector");
            None
        }
    }
}

/// Whitespace-collapsed text content of an element.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of `el`, or `None` if it is blank.
pub(crate) fn non_empty_text(el: ElementRef<'_>) -> Option<String> {
    let text = element_text(el);
    (!text.is_empty()).then_some(text)
}

/// First element matching any selector in `candidates`, tried in order.
///
/// Later selectors are only consulted when earlier ones match nothing.
pub(crate) fn first_match<'a>(root: ElementRef<'a>, candidates: &[&str]) -> Option<ElementRef<'a>> {
    candidates
        .iter()
        .filter_map(|css| sel(css))
        .find_map(|selector| root.select(&selector).next())
}

/// First element in the whole document matching any of `candidates`.
pub(crate) fn first_in_document<'a>(doc: &'a Html, candidates: &[&str]) -> Option<ElementRef<'a>> {
    first_match(doc.root_element(), candidates)
}

/// Every element under `root` matching `css`, in document order.
pub(crate) fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    sel(css).map_or_else(Vec::new, |selector| root.select(&selector).collect())
}

/// A selector path that identifies `el` uniquely within its document.
///
/// Uses the nearest ancestor with an `id` as an anchor, then
/// `tag:nth-of-type(n)` steps down to the element. Used to hand an element
/// found in a snapshot back to a live page for clicking.
pub(crate) fn css_path(el: ElementRef<'_>) -> String {
    let mut steps = Vec::new();
    let mut current = Some(el);

    while let Some(node) = current {
        let value = node.value();
        if let Some(id) = value.id() {
            if is_plain_ident(id) {
                steps.push(format!("#{id}"));
                break;
            }
        }

        let tag = value.name();
        let index = node
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sib| sib.value().name() == tag)
            .count()
            + 1;
        steps.push(format!("{tag}:nth-of-type({index})"));

        current = node.parent().and_then(ElementRef::wrap);
        if current.is_some_and(|p| p.value().name() == "html") {
            steps.push("html".to_owned());
            break;
        }
    }

    steps.reverse();
    steps.join(" > ")
}

fn is_plain_ident(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <html><body>
          <div id="reviews">
            <p>first</p>
            <p>second   <b>bold</b></p>
          </div>
          <section><span>a</span><span class="x">b</span></section>
        </body></html>"#;

    #[test]
    fn first_match_respects_candidate_order() {
        let doc = Html::parse_document(DOC);
        let el = first_in_document(&doc, &["h1", "section span.x", "p"]).unwrap();
        assert_eq!(element_text(el), "b");
    }

    #[test]
    fn invalid_selectors_are_skipped() {
        let doc = Html::parse_document(DOC);
        let el = first_in_document(&doc, &["[[nope", "p"]).unwrap();
        assert_eq!(element_text(el), "first");
    }

    #[test]
    fn element_text_collapses_whitespace() {
        let doc = Html::parse_document(DOC);
        let second = select_all(doc.root_element(), "#reviews p")[1];
        assert_eq!(element_text(second), "second bold");
    }

    #[test]
    fn css_path_anchors_on_id_and_round_trips() {
        let doc = Html::parse_document(DOC);
        let second = select_all(doc.root_element(), "#reviews p")[1];
        let path = css_path(second);
        assert_eq!(path, "#reviews > p:nth-of-type(2)");
        let found = first_in_document(&doc, &[path.as_str()]).unwrap();
        assert_eq!(found.id(), second.id());
    }

    #[test]
    fn css_path_without_id_walks_to_html() {
        let doc = Html::parse_document(DOC);
        let span = first_in_document(&doc, &["span.x"]).unwrap();
        let path = css_path(span);
        assert!(path.starts_with("html > body:nth-of-type(1)"), "{path}");
        let found = first_in_document(&doc, &[path.as_str()]).unwrap();
        assert_eq!(found.id(), span.id());
    }
}
