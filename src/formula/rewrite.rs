use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Formula text after substitution, plus which fields were found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaRewrite {
    pub content: String,
    pub url_replaced: bool,
    pub checksum_replaced: bool,
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^([ \t]*)url\s+"[^"]*\d+\.\d+\.\d+[^"]*""#).expect("url regex is valid")
    })
}

fn checksum_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^([ \t]*)sha256\s+"[0-9A-Fa-f]*""#).expect("sha256 regex is valid")
    })
}

/// Point the first versioned `url` and the first `sha256` at a new archive.
///
/// Only the first occurrence of each field is touched, so `resource` blocks
/// further down the formula keep their own values.
pub fn rewrite_formula(content: &str, url: &str, sha256: &str) -> FormulaRewrite {
    let url_replaced = url_regex().is_match(content);
    let content = url_regex().replacen(content, 1, |caps: &Captures| {
        format!("{}url \"{}\"", &caps[1], url)
    });

    let checksum_replaced = checksum_regex().is_match(&content);
    let content = checksum_regex().replacen(&content, 1, |caps: &Captures| {
        format!("{}sha256 \"{}\"", &caps[1], sha256)
    });

    FormulaRewrite {
        content: content.into_owned(),
        url_replaced,
        checksum_replaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMULA: &str = r#"class Tool < Formula
  desc "Release helper"
  homepage "https://github.com/acme/tool"
  url "https://github.com/acme/tool/archive/refs/tags/v1.2.3.tar.gz"
  sha256 "0000000000000000000000000000000000000000000000000000000000000000"
  license "MIT"

  resource "extra" do
    url "https://example.com/extra-2.0.0.tar.gz"
    sha256 "1111111111111111111111111111111111111111111111111111111111111111"
  end
end
"#;

    const NEW_URL: &str = "https://github.com/acme/tool/archive/refs/tags/v1.3.0.tar.gz";
    const NEW_SHA: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

    #[test]
    fn test_rewrite_replaces_both_fields() {
        let rewrite = rewrite_formula(FORMULA, NEW_URL, NEW_SHA);
        assert!(rewrite.url_replaced);
        assert!(rewrite.checksum_replaced);
        assert!(rewrite
            .content
            .contains(&format!("  url \"{}\"\n", NEW_URL)));
        assert!(rewrite
            .content
            .contains(&format!("  sha256 \"{}\"\n", NEW_SHA)));
        assert!(!rewrite.content.contains("v1.2.3"));
    }

    #[test]
    fn test_rewrite_leaves_resources_alone() {
        let rewrite = rewrite_formula(FORMULA, NEW_URL, NEW_SHA);
        assert!(rewrite
            .content
            .contains("    url \"https://example.com/extra-2.0.0.tar.gz\""));
        assert!(rewrite.content.contains(&"1".repeat(64)));
    }

    #[test]
    fn test_rewrite_keeps_unrelated_lines() {
        let rewrite = rewrite_formula(FORMULA, NEW_URL, NEW_SHA);
        assert!(rewrite.content.contains("  homepage \"https://github.com/acme/tool\""));
        assert!(rewrite.content.contains("  license \"MIT\""));
        assert_eq!(rewrite.content.lines().count(), FORMULA.lines().count());
    }

    #[test]
    fn test_rewrite_reports_missing_fields() {
        let rewrite = rewrite_formula("class Tool < Formula\nend\n", NEW_URL, NEW_SHA);
        assert!(!rewrite.url_replaced);
        assert!(!rewrite.checksum_replaced);
        assert_eq!(rewrite.content, "class Tool < Formula\nend\n");
    }

    #[test]
    fn test_rewrite_ignores_unversioned_url() {
        let formula = "  url \"https://github.com/acme/tool.git\", branch: \"main\"\n";
        let rewrite = rewrite_formula(formula, NEW_URL, NEW_SHA);
        assert!(!rewrite.url_replaced);
        assert_eq!(rewrite.content, formula);
    }

    #[test]
    fn test_rewrite_dollar_in_url_is_literal() {
        let rewrite = rewrite_formula(FORMULA, "https://x.test/$1/v9.9.9.tar.gz", NEW_SHA);
        assert!(rewrite.content.contains("url \"https://x.test/$1/v9.9.9.tar.gz\""));
    }
}
