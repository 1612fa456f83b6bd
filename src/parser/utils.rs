//! Utility functions for label escaping in Newick strings.
//!
//! Labels containing Newick punctuation have to be single quoted when a tree
//! is written, otherwise the string could not be read back.

/// Characters that cannot appear in an unquoted Newick label.
const SPECIAL_CHARS: &[char] = &[',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Checks if a label is already escaped:
/// - wrapped in single quotes and each internal single quote doubled, or
/// - no space and special characters
///
/// # Examples
/// ```
/// # use labelgtc::parser::utils::is_escaped;
/// assert_eq!(is_escaped("hbb1_HUMAN"), true);
/// assert_eq!(is_escaped("hbb1[x]_HUMAN"), false);
/// assert_eq!(is_escaped("hbb1 HUMAN"), false);
/// assert_eq!(is_escaped("'hbb1 HUMAN'"), true);
/// assert_eq!(is_escaped("'hbb1''s_HUMAN'"), true);
/// assert_eq!(is_escaped("'hbb1's HUMAN'"), false);
/// ```
pub fn is_escaped(label: &str) -> bool {
    if is_single_quoted(label) {
        let inner = &label[1..label.len() - 1];
        let mut prev = ' ';
        for char in inner.chars() {
            if prev == '\'' {
                if char != '\'' {
                    return false;
                }
                prev = ' ';
            } else {
                prev = char;
            }
        }
        // A trailing lone quote is unescaped as well
        prev != '\''
    } else {
        !label.chars().any(|c| c == ' ' || SPECIAL_CHARS.contains(&c))
    }
}

/// Checks if a label is enclosed in single quotes.
///
/// # Examples
/// ```
/// # use labelgtc::parser::utils::is_single_quoted;
/// assert_eq!(is_single_quoted("a_A"), false);
/// assert_eq!(is_single_quoted("'a A'"), true);
/// ```
pub fn is_single_quoted(label: &str) -> bool {
    label.starts_with('\'') && label.ends_with('\'') && label.len() >= 2
}

/// Escapes a label for safe use in Newick strings.
///
/// Labels containing special characters are wrapped in single quotes, with
/// internal single quotes doubled. Spaces in otherwise plain labels are
/// replaced with underscores. Already escaped labels are returned as-is.
///
/// # Examples
/// ```
/// # use labelgtc::parser::utils::escape_label;
/// assert_eq!(escape_label("a_A"), "a_A");
/// assert_eq!(escape_label("a(1)_A"), "'a(1)_A'");
/// assert_eq!(escape_label("gene a_A"), "gene_a_A");
/// assert_eq!(escape_label("it's_A"), "'it''s_A'");
/// ```
pub fn escape_label(label: &str) -> String {
    if is_escaped(label) {
        return label.to_string();
    }

    if label.chars().any(|c| SPECIAL_CHARS.contains(&c)) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}
