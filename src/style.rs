// src/style.rs
//
// Editing one declaration inside an inline `style` attribute value.
//
// - No style attribute      → "{property}:{size}px;"
// - Property not declared   → terminate the last declaration with ';' if needed, then append.
// - Property declared       → replace the text between "{property}:" and the next ';'
//                             (or end of value) with "{size}px". The last occurrence wins.
//
// Matching is a literal substring search for "{property}:", not CSS-aware:
// asking for "height" also matches inside "max-height:".

use crate::error::{Error, Result};

/// Return the new `style` attribute value with `property` set to `size` pixels.
///
/// `style` is the current attribute value, or `None` when the element has no
/// `style` attribute. Every other declaration keeps its text and position.
pub fn apply_style(style: Option<&str>, property: &str, size: i64) -> Result<String> {
    if size < 0 {
        return Err(Error::InvalidArgument(format!(
            "size must be non-negative, got {size}"
        )));
    }

    let Some(style) = style else {
        return Ok(declaration(property, size));
    };

    let needle = format!("{property}:");
    let Some(at) = style.rfind(&needle) else {
        let mut out = String::with_capacity(style.len() + needle.len() + 8);
        out.push_str(style);
        if !style.ends_with(';') {
            out.push(';');
        }
        out.push_str(&declaration(property, size));
        return Ok(out);
    };

    let value_start = at + needle.len();
    let value_end = style[value_start..]
        .find(';')
        .map(|off| value_start + off)
        .unwrap_or(style.len());

    let mut out = String::with_capacity(style.len() + 8);
    out.push_str(&style[..value_start]);
    out.push_str(&size.to_string());
    out.push_str("px");
    out.push_str(&style[value_end..]);
    Ok(out)
}

fn declaration(property: &str, size: i64) -> String {
    format!("{property}:{size}px;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_declaration_without_style() {
        assert_eq!(
            apply_style(None, "max-height", 200).unwrap(),
            "max-height:200px;"
        );
    }

    #[test]
    fn appends_after_terminated_declaration() {
        assert_eq!(
            apply_style(Some("border:1px;"), "max-height", 200).unwrap(),
            "border:1px;max-height:200px;"
        );
    }

    #[test]
    fn terminates_last_declaration_before_appending() {
        assert_eq!(
            apply_style(Some("border:1px"), "max-width", 50).unwrap(),
            "border:1px;max-width:50px;"
        );
    }

    #[test]
    fn replaces_only_the_value() {
        assert_eq!(
            apply_style(Some("max-height:300px;"), "max-height", 200).unwrap(),
            "max-height:200px;"
        );
        assert_eq!(
            apply_style(Some("border: 1px; max-height: 30em ; color:red"), "max-height", 0)
                .unwrap(),
            "border: 1px; max-height:0px; color:red"
        );
    }

    #[test]
    fn replaces_unterminated_value_at_end() {
        assert_eq!(
            apply_style(Some("color:red;max-height:1px"), "max-height", 75).unwrap(),
            "color:red;max-height:75px"
        );
    }

    #[test]
    fn edits_last_occurrence() {
        assert_eq!(
            apply_style(Some("max-height:1px;max-height:2px;"), "max-height", 9).unwrap(),
            "max-height:1px;max-height:9px;"
        );
    }

    #[test]
    fn matches_property_as_literal_substring() {
        // "height:" is found inside "max-height:".
        assert_eq!(
            apply_style(Some("max-height:300px;"), "height", 10).unwrap(),
            "max-height:10px;"
        );
    }

    #[test]
    fn rejects_negative_size() {
        let err = apply_style(Some("border:1px;"), "max-height", -1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
