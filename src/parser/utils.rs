//! Label escaping for writing Newick strings.
//!
//! The parser keeps labels verbatim (underscores stay underscores), so the
//! writer quotes instead of substituting characters: a label that would not
//! survive as an unquoted token is wrapped in single quotes with internal
//! quotes doubled.

/// Characters that terminate an unquoted Newick label.
const SPECIAL_CHARACTERS: &[char] = &[' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Checks whether a label has to be quoted to be read back unchanged.
///
/// # Examples
/// ```
/// # use langtree::parser::utils::needs_quotes;
/// assert!(!needs_quotes("deu"));
/// assert!(!needs_quotes("Australasian_Swamphen"));
/// assert!(needs_quotes("Australasian Swamphen"));
/// assert!(needs_quotes("Pu[ke]ko"));
/// assert!(needs_quotes("Baillon's"));
/// ```
pub fn needs_quotes(label: &str) -> bool {
    label.contains(SPECIAL_CHARACTERS)
}

/// Escapes a label for use in a Newick string.
///
/// # Examples
/// ```
/// # use langtree::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quotes(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
