// src/analyzer/version.rs
// =============================================================================
// Detects which markup standard a page declares.
//
// Detection is a plain substring scan for known DOCTYPE signatures. The
// table is an ordered slice, most specific first, and the FIRST hit wins,
// so a page that (spuriously) contains several signatures always gets the
// same answer.
// =============================================================================

use scraper::{Html, Node};
use tracing::debug;

// (standard name, signature) pairs, scanned top to bottom.
//
// Longer public identifiers come before shorter ones and HTML 5 comes last,
// because its signature is the least specific of the lot.
pub const DOCTYPES: &[(&str, &str)] = &[
    ("XHTML 1.1", r#""-//W3C//DTD XHTML 1.1//EN""#),
    ("XHTML 1.0 Frameset", r#""-//W3C//DTD XHTML 1.0 Frameset//EN""#),
    ("XHTML 1.0 Transitional", r#""-//W3C//DTD XHTML 1.0 Transitional//EN""#),
    ("XHTML 1.0 Strict", r#""-//W3C//DTD XHTML 1.0 Strict//EN""#),
    ("HTML 4.01 Frameset", r#""-//W3C//DTD HTML 4.01 Frameset//EN""#),
    ("HTML 4.01 Transitional", r#""-//W3C//DTD HTML 4.01 Transitional//EN""#),
    ("HTML 4.01 Strict", r#""-//W3C//DTD HTML 4.01//EN""#),
    ("HTML 5", "<!DOCTYPE html>"),
];

// Returns the first standard whose signature occurs in `markup`
pub fn detect_version(markup: &str) -> Option<&'static str> {
    DOCTYPES
        .iter()
        .find(|(_, signature)| markup.contains(signature))
        .map(|(name, _)| *name)
}

// Detects the version of a fetched page.
//
// The source as served is checked first since it keeps the public
// identifiers verbatim. If that finds nothing, the doctype node of the
// parsed tree is rendered back to markup and checked too: the parser
// lowercases the name, so `<!doctype html>` still counts as HTML 5, while
// public and system identifiers are kept as written.
//
// A page without a doctype node has nothing to serialise; that is reported
// as "no version" instead of failing the analysis.
pub fn detect_document_version(source: &str, document: &Html) -> Option<&'static str> {
    if let Some(version) = detect_version(source) {
        return Some(version);
    }

    match render_doctype(document) {
        Some(doctype) => detect_version(&doctype),
        None => {
            debug!("document has no doctype, markup version unknown");
            None
        }
    }
}

// Renders the document's doctype node as `<!DOCTYPE name PUBLIC "pid" "sid">`,
// leaving out the identifiers that are empty
fn render_doctype(document: &Html) -> Option<String> {
    let doctype = document
        .tree
        .root()
        .children()
        .find_map(|node| match node.value() {
            Node::Doctype(doctype) => Some(doctype),
            _ => None,
        })?;

    let mut rendered = format!("<!DOCTYPE {}", doctype.name());
    let (public_id, system_id) = (doctype.public_id(), doctype.system_id());
    if !public_id.is_empty() {
        rendered.push_str(&format!(r#" PUBLIC "{}""#, public_id));
        if !system_id.is_empty() {
            rendered.push_str(&format!(r#" "{}""#, system_id));
        }
    } else if !system_id.is_empty() {
        rendered.push_str(&format!(r#" SYSTEM "{}""#, system_id));
    }
    rendered.push('>');

    Some(rendered)
}
