use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    /// Opening `<svg` through the nearest closing `</svg>`, any case, across lines.
    static ref SVG_PATTERN: Regex = Regex::new(r"(?is)<svg.*?</svg>").expect("valid svg pattern");
}

/// First `<svg ...>...</svg>` block in `text`. Well-formedness is not checked.
pub fn extract_svg(text: &str) -> Option<&str> {
    SVG_PATTERN.find(text).map(|m| m.as_str())
}

/// `text` with its first SVG block replaced by `placeholder`.
pub fn replace_svg<'a>(text: &'a str, placeholder: &str) -> Cow<'a, str> {
    SVG_PATTERN.replace(text, regex::NoExpand(placeholder))
}
