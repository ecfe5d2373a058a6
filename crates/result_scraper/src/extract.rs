//! Adaptéry "raw bytes -> normalizovaný text", jeden na typ zdroje.
//! Matcher pak běží nad výstupem stejně pro všechny zdroje.

use scraper::Html;

pub trait TextExtractor {
    fn extract(&self, raw: &[u8]) -> String;
}

/// Každý běh whitespace -> jedna mezera
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Markup zůstává, jen se slisují mezery (stránka "Games")
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseWhitespace;

impl TextExtractor for CollapseWhitespace {
    fn extract(&self, raw: &[u8]) -> String {
        collapse_whitespace(&String::from_utf8_lossy(raw))
    }
}

/// Jen textové uzly dokumentu, bez <script>/<style>
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlText;

impl TextExtractor for HtmlText {
    fn extract(&self, raw: &[u8]) -> String {
        let html = String::from_utf8_lossy(raw);
        let document = Html::parse_document(&html);

        let mut parts: Vec<&str> = Vec::new();
        for node in document.root_element().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| matches!(e.name(), "script" | "style" | "noscript")))
                .unwrap_or(false);
            if !hidden {
                parts.push(&**text);
            }
        }

        collapse_whitespace(&parts.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    Collapse,
    Html,
}

impl TextExtractor for ExtractorKind {
    fn extract(&self, raw: &[u8]) -> String {
        match self {
            Self::Collapse => CollapseWhitespace.extract(raw),
            Self::Html => HtmlText.extract(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_keeps_markup() {
        let raw = b"<td>Spain</td>\n\t  <td>82</td>\r\n<td>-</td>";
        assert_eq!(CollapseWhitespace.extract(raw), "<td>Spain</td> <td>82</td> <td>-</td>");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let raw = b"Spain \xff 82-76 Italy";
        assert_eq!(CollapseWhitespace.extract(raw), "Spain \u{fffd} 82-76 Italy");
    }

    #[test]
    fn html_text_drops_tags_and_scripts() {
        let raw = br#"<html><head><style>.x{}</style><script>var s = "Spain 1-0 Italy";</script></head>
            <body><div class="game"><span>Spain</span><b>82</b>-<b>76</b><span>Italy</span></div></body></html>"#;
        assert_eq!(HtmlText.extract(raw), "Spain 82 - 76 Italy");
    }

    #[test]
    fn kind_dispatches() {
        let raw = b"<p>Spain   82-76</p>";
        assert_eq!(ExtractorKind::Collapse.extract(raw), "<p>Spain 82-76</p>");
        assert_eq!(ExtractorKind::Html.extract(raw), "Spain 82-76");
    }
}
