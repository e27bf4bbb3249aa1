use std::sync::LazyLock;

use regex::Regex;

use crate::error::InstrumentError;
use crate::span::{ByteRange, LineIndex};
use crate::syntax::{AstFormat, EmbeddedScript};

use super::js::parse_script;

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("valid script regex")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(lang|type)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attribute regex")
});

/// A `<script>` body found in a markup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    /// Byte range of the body, between `<script ...>` and `</script>`.
    pub range: ByteRange,
    pub format: AstFormat,
}

/// Locate script bodies worth parsing.
///
/// Blocks with an unknown `type`/`lang` (templates, JSON, ...) and blocks
/// that contain only whitespace are skipped.
pub fn find_scripts(content: &str) -> Vec<ScriptBlock> {
    SCRIPT_BLOCK
        .captures_iter(content)
        .filter_map(|caps| {
            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let body = caps.get(2)?;

            if body.as_str().trim().is_empty() {
                return None;
            }

            Some(ScriptBlock {
                range: ByteRange::new(body.start(), body.end()),
                format: script_format(attrs)?,
            })
        })
        .collect()
}

fn script_format(attrs: &str) -> Option<AstFormat> {
    let mut lang = None;
    let mut kind = None;

    for caps in ATTRIBUTE.captures_iter(attrs) {
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().trim().to_ascii_lowercase())
            .unwrap_or_default();

        if caps[1].eq_ignore_ascii_case("lang") {
            lang = Some(value);
        } else {
            kind = Some(value);
        }
    }

    if let Some(lang) = lang {
        return match lang.as_str() {
            "ts" | "typescript" => Some(AstFormat::Ts),
            "tsx" => Some(AstFormat::Tsx),
            "js" | "javascript" | "jsx" => Some(AstFormat::Js),
            _ => None,
        };
    }

    match kind.as_deref() {
        None | Some("") | Some("module") | Some("text/javascript")
        | Some("application/javascript") => Some(AstFormat::Js),
        Some("text/typescript") | Some("application/typescript") => Some(AstFormat::Ts),
        _ => None,
    }
}

/// Parse every script block of a markup file.
pub fn parse_markup(
    content: &str,
    file_name: &str,
    lines: &LineIndex,
) -> Result<Vec<EmbeddedScript>, InstrumentError> {
    find_scripts(content)
        .into_iter()
        .map(|block| {
            let text = &content[block.range.start..block.range.end];
            let ast = parse_script(text, file_name, block.format, block.range.start, lines)?;
            Ok(EmbeddedScript {
                range: block.range,
                ast,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_script_bodies_with_offsets() {
        let html = "<p>hi</p>\n<script>\nconst a = 1;\n</script>\n";
        let scripts = find_scripts(html);

        assert_eq!(scripts.len(), 1);
        let range = scripts[0].range;
        assert_eq!(&html[range.start..range.end], "\nconst a = 1;\n");
        assert_eq!(scripts[0].format, AstFormat::Js);
    }

    #[test]
    fn detects_script_languages() {
        let html = concat!(
            "<script lang=\"ts\">let a: number = 1;</script>",
            "<script type='module'>import x from 'y';</script>",
            "<script lang=tsx>let b = 2;</script>",
            "<script type=\"text/template\"><div></div></script>",
            "<script type=\"application/json\">{\"a\": 1}</script>",
            "<SCRIPT TYPE=\"text/javascript\">go();</SCRIPT>",
        );

        let formats: Vec<AstFormat> = find_scripts(html).into_iter().map(|s| s.format).collect();
        assert_eq!(
            formats,
            vec![AstFormat::Ts, AstFormat::Js, AstFormat::Tsx, AstFormat::Js]
        );
    }

    #[test]
    fn skips_empty_and_external_scripts() {
        let html = "<script src=\"app.js\"></script><script>  \n </script>";
        assert!(find_scripts(html).is_empty());
    }

    #[test]
    fn parse_markup_reports_errors_relative_to_the_file() {
        let html = "<html>\n<body>\n<script>\nlet = ;\n</script>\n</body>\n</html>";
        let err = match parse_markup(html, "index.html", &LineIndex::new(html)) {
            Ok(_) => panic!("expected a syntax error"),
            Err(e) => e,
        };

        match err {
            InstrumentError::Parse { file, line, .. } => {
                assert_eq!(file, "index.html");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
