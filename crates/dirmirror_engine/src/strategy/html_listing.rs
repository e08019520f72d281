use std::collections::HashSet;

use dirmirror_core::SourceLocation;

/// A usable link found on an autoindex page, as its path relative to that
/// page's directory. Paths stay percent-encoded as linked; decoding happens
/// once, when discovered entries are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingTarget {
    File(String),
    Directory(String),
}

impl ListingTarget {
    pub fn path(&self) -> &str {
        match self {
            ListingTarget::File(path) | ListingTarget::Directory(path) => path,
        }
    }
}

/// Pulls `href` values out of `<a ...>` tags by plain text scanning.
///
/// This is not an HTML parser. It is enough for server-generated directory
/// indexes: quoted and bare attribute values, any letter case, and the
/// common character entities.
pub fn extract_link_targets(html: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut targets = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = lower[cursor..].find("<a") {
        let attrs_start = cursor + offset + 2;
        cursor = attrs_start;
        match bytes.get(attrs_start) {
            Some(b) if b.is_ascii_whitespace() => {}
            // <abbr>, <area>, bare <a>
            _ => continue,
        }
        let tag_end = find_tag_end(bytes, attrs_start);
        if let Some(value) = href_value(&html[attrs_start..tag_end], &lower[attrs_start..tag_end]) {
            targets.push(decode_entities(value));
        }
        cursor = tag_end;
    }
    targets
}

/// Resolves raw link targets against `location`, keeping only those that
/// point strictly inside it. Duplicates are dropped, page order is kept.
pub fn resolve_targets(location: &SourceLocation, hrefs: &[String]) -> Vec<ListingTarget> {
    let mut seen = HashSet::new();
    hrefs
        .iter()
        .filter_map(|href| resolve_target(location, href))
        .filter(|target| seen.insert(target.path().to_string()))
        .collect()
}

fn resolve_target(location: &SourceLocation, href: &str) -> Option<ListingTarget> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('?') || href.starts_with('#') {
        return None;
    }
    if matches!(href, "." | "./" | ".." | "../" | "/") {
        return None;
    }
    if href.starts_with("//") || has_scheme(href) {
        return None;
    }

    // Joining the raw href handles `./name`, `name:with:colons` and absolute
    // paths that still point inside this directory.
    let mut url = location.directory_url().join(href).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    let path = location.relative_to_directory(&url)?;
    if path.ends_with('/') {
        Some(ListingTarget::Directory(path))
    } else {
        Some(ListingTarget::File(path))
    }
}

fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn find_tag_end(bytes: &[u8], from: usize) -> usize {
    let mut quote: Option<u8> = None;
    for (index, &byte) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(open) if byte == open => quote = None,
            Some(_) => {}
            None if byte == b'"' || byte == b'\'' => quote = Some(byte),
            None if byte == b'>' => return index,
            None => {}
        }
    }
    bytes.len()
}

/// `tag` and `lower` are the same attribute text, original and lowercased.
fn href_value<'a>(tag: &'a str, lower: &str) -> Option<&'a str> {
    let bytes = lower.as_bytes();
    let mut search = 0;
    while let Some(offset) = lower[search..].find("href") {
        let name_start = search + offset;
        let mut index = name_start + "href".len();
        search = index;
        if name_start > 0 && !bytes[name_start - 1].is_ascii_whitespace() {
            continue;
        }
        while bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
            index += 1;
        }
        if bytes.get(index) != Some(&b'=') {
            continue;
        }
        index += 1;
        while bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
            index += 1;
        }
        return match bytes.get(index) {
            Some(&quote @ (b'"' | b'\'')) => {
                let rest = &tag[index + 1..];
                let len = rest.find(quote as char).unwrap_or(rest.len());
                Some(&rest[..len])
            }
            Some(_) => {
                let rest = &tag[index..];
                let len = rest
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                Some(&rest[..len])
            }
            None => None,
        };
    }
    None
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::{extract_link_targets, resolve_targets, ListingTarget};
    use dirmirror_core::SourceLocation;

    const NGINX_INDEX: &str = r#"<html>
<head><title>Index of /assets/</title></head>
<body>
<h1>Index of /assets/</h1><hr><pre><a href="../">../</a>
<a href="img/">img/</a>                                              01-Jan-2024 10:00       -
<a href="a.txt">a.txt</a>                                           01-Jan-2024 10:00      12
<a href="my%20notes.md">my notes.md</a>                             01-Jan-2024 10:00      40
</pre><hr></body>
</html>"#;

    fn root() -> SourceLocation {
        SourceLocation::parse("http://cdn.example.com/assets/").unwrap()
    }

    #[test]
    fn nginx_autoindex_links_are_extracted() {
        assert_eq!(
            extract_link_targets(NGINX_INDEX),
            vec!["../", "img/", "a.txt", "my%20notes.md"]
        );
    }

    #[test]
    fn quoting_styles_and_case_are_handled() {
        let html = "<A HREF='one.txt'>1</A><a class=x href=two.txt>2</a>\
                    <a\n  href = \"three.txt\" title='a > b'>3</a><abbr href=\"no\">";
        assert_eq!(
            extract_link_targets(html),
            vec!["one.txt", "two.txt", "three.txt"]
        );
    }

    #[test]
    fn data_href_attributes_are_not_links() {
        let html = r#"<a data-href="wrong.txt" href="right.txt">x</a>"#;
        assert_eq!(extract_link_targets(html), vec!["right.txt"]);
    }

    #[test]
    fn entities_in_targets_are_decoded() {
        let html = r#"<a href="a&amp;b.txt">a&b</a>"#;
        assert_eq!(extract_link_targets(html), vec!["a&b.txt"]);
    }

    #[test]
    fn navigation_and_external_targets_are_filtered() {
        let hrefs: Vec<String> = [
            "?C=N;O=D",
            "#top",
            "../",
            "..",
            "/",
            "./",
            "https://elsewhere.example.com/x.txt",
            "//cdn.other.net/y.txt",
            "mailto:ops@example.com",
            "/other/z.txt",
            "./keep.txt",
            "keep.txt",
            "sub/",
            "/assets/abs.txt",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(
            resolve_targets(&root(), &hrefs),
            vec![
                ListingTarget::File("keep.txt".into()),
                ListingTarget::Directory("sub/".into()),
                ListingTarget::File("abs.txt".into()),
            ]
        );
    }

    #[test]
    fn targets_keep_their_linked_encoding() {
        let hrefs = vec![
            "my%20notes.md".to_string(),
            "a%2541.txt".to_string(),
            "odd:name.txt?download=1".to_string(),
        ];
        assert_eq!(
            resolve_targets(&root(), &hrefs),
            vec![
                ListingTarget::File("my%20notes.md".into()),
                ListingTarget::File("a%2541.txt".into()),
            ]
        );
        let targets = resolve_targets(&root(), &["./odd:name.txt?download=1".to_string()]);
        assert_eq!(targets, vec![ListingTarget::File("odd:name.txt".into())]);
    }
}
