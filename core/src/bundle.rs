//! Bundle size helpers.
//!
//! Pages only pull in the button variants and sizes they use. When a page
//! declares none, every variant is kept.

/// Every button variant.
pub const BUTTON_VARIANTS: [&str; 6] = ["default", "destructive", "outline", "secondary", "ghost", "link"];

/// Every button size.
pub const BUTTON_SIZES: [&str; 4] = ["default", "sm", "lg", "icon"];

/// Variants to bundle for buttons.
#[must_use]
pub fn button_variants(used: &[&str]) -> Vec<String> {
    keep_used_or_all(used, &BUTTON_VARIANTS)
}

/// Sizes to bundle for buttons.
#[must_use]
pub fn button_sizes(used: &[&str]) -> Vec<String> {
    keep_used_or_all(used, &BUTTON_SIZES)
}

/// Classes to keep for `component`.
///
/// Only the used variants are kept; unused class pruning per component is not
/// implemented, so `component` is currently ignored.
#[must_use]
pub fn optimized_classes(_component: &str, used: &[&str]) -> Vec<String> {
    used.iter().map(ToString::to_string).collect()
}

fn keep_used_or_all(used: &[&str], all: &[&str]) -> Vec<String> {
    let source = if used.is_empty() { all } else { used };
    source.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_variants_are_kept() {
        assert_eq!(button_variants(&["default", "outline"]), vec!["default", "outline"]);
    }

    #[test]
    fn test_all_variants_when_none_used() {
        assert_eq!(
            button_variants(&[]),
            vec!["default", "destructive", "outline", "secondary", "ghost", "link"]
        );
    }

    #[test]
    fn test_sizes() {
        assert_eq!(button_sizes(&["sm", "lg"]), vec!["sm", "lg"]);
        assert_eq!(button_sizes(&[]), vec!["default", "sm", "lg", "icon"]);
    }

    #[test]
    fn test_optimized_classes_returns_used_variants() {
        assert_eq!(optimized_classes("Button", &["ghost"]), vec!["ghost"]);
        assert!(optimized_classes("Card", &[]).is_empty());
    }
}
