use std::fmt;

/// Name of the sheet picked by exact match when nothing else is configured.
pub const DEFAULT_EXACT_SHEET: &str = "DATA PERALIHAN NEW";
/// Substring used to pick the second sheet when nothing else is configured.
pub const DEFAULT_SHEET_PATTERN: &str = "RDN";

/// Describes how a sheet is picked out of a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    /// The sheet named exactly this.
    Exact(String),
    /// The first sheet, in declared order, whose name contains this
    /// (case-sensitive).
    Contains(String),
}

impl SheetSelector {
    /// Returns the selected sheet name, if any sheet matches.
    pub fn find<'a>(&self, sheet_names: &'a [String]) -> Option<&'a str> {
        let found = match self {
            SheetSelector::Exact(name) => sheet_names.iter().find(|sheet| *sheet == name),
            SheetSelector::Contains(pattern) => sheet_names
                .iter()
                .find(|sheet| sheet.contains(pattern.as_str())),
        };
        found.map(String::as_str)
    }

    /// Title shown in the section header.
    pub fn title(&self) -> String {
        match self {
            SheetSelector::Exact(name) => name.clone(),
            SheetSelector::Contains(pattern) => format!("Data {pattern}"),
        }
    }

    /// Line announcing which sheet a substring search settled on.
    pub fn found_message(&self, sheet: &str) -> Option<String> {
        match self {
            SheetSelector::Exact(_) => None,
            SheetSelector::Contains(pattern) => Some(format!("Found {pattern} sheet: {sheet}")),
        }
    }

    pub fn not_found_message(&self) -> String {
        match self {
            SheetSelector::Exact(name) => format!("Sheet '{name}' not found."),
            SheetSelector::Contains(pattern) => format!("Sheet with '{pattern}' not found."),
        }
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Exact(name) => write!(f, "exact:{name}"),
            SheetSelector::Contains(pattern) => write!(f, "contains:{pattern}"),
        }
    }
}

/// The two selectors applied when the caller does not configure any.
pub fn default_selectors() -> Vec<SheetSelector> {
    vec![
        SheetSelector::Exact(DEFAULT_EXACT_SHEET.to_string()),
        SheetSelector::Contains(DEFAULT_SHEET_PATTERN.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn exact_match_ignores_similar_names() {
        let sheets = names(&["DATA PERALIHAN", "data peralihan new", "DATA PERALIHAN NEW"]);
        let selector = SheetSelector::Exact(DEFAULT_EXACT_SHEET.into());
        assert_eq!(selector.find(&sheets), Some("DATA PERALIHAN NEW"));
        assert_eq!(selector.find(&sheets[..2]), None);
    }

    #[test]
    fn first_substring_match_wins_over_later_exact_name() {
        let sheets = names(&["Summary", "RDN Archive", "Data RDN"]);
        let selector = SheetSelector::Contains(DEFAULT_SHEET_PATTERN.into());
        assert_eq!(selector.find(&sheets), Some("RDN Archive"));
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        let sheets = names(&["Data rdn", "Rdn"]);
        let selector = SheetSelector::Contains(DEFAULT_SHEET_PATTERN.into());
        assert_eq!(selector.find(&sheets), None);
    }

    #[test]
    fn messages_follow_the_selector_kind() {
        let exact = SheetSelector::Exact(DEFAULT_EXACT_SHEET.into());
        let contains = SheetSelector::Contains(DEFAULT_SHEET_PATTERN.into());

        assert_eq!(exact.title(), "DATA PERALIHAN NEW");
        assert_eq!(contains.title(), "Data RDN");
        assert_eq!(exact.found_message("x"), None);
        assert_eq!(
            contains.found_message("Data RDN").as_deref(),
            Some("Found RDN sheet: Data RDN")
        );
        assert_eq!(
            exact.not_found_message(),
            "Sheet 'DATA PERALIHAN NEW' not found."
        );
        assert_eq!(contains.not_found_message(), "Sheet with 'RDN' not found.");
    }
}
