use std::fmt;

/// Parsed window feature string (`toolbar=yes,width=400,noopener`).
///
/// Pairs keep their original order; a bare token is treated as enabled.
/// Later duplicates win on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    pairs: Vec<(String, String)>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-separated browser feature syntax. Whitespace around
    /// separators is tolerated; empty segments are skipped.
    pub fn parse(raw: &str) -> Self {
        let mut pairs = Vec::new();
        for segment in raw.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some((name, value)) => {
                    pairs.push((name.trim().to_string(), value.trim().to_string()));
                }
                None => pairs.push((segment.to_string(), String::new())),
            }
        }
        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Last value set for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `name` is present and turned on (bare token, `yes`, `1`, `true`).
    pub fn enabled(&self, name: &str) -> bool {
        match self.get(name) {
            Some(value) => value.is_empty() || matches!(value, "yes" | "1" | "true"),
            None => false,
        }
    }

    /// Numeric value for `name` (e.g. `width`, `left`).
    pub fn number(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if value.is_empty() {
                write!(f, "{name}")?;
            } else {
                write!(f, "{name}={value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_pairs() {
        let features = FeatureSet::parse("toolbar=yes,menubar=no,width=400");
        assert_eq!(features.get("toolbar"), Some("yes"));
        assert_eq!(features.get("menubar"), Some("no"));
        assert_eq!(features.number("width"), Some(400));
    }

    #[test]
    fn bare_token_counts_as_enabled() {
        let features = FeatureSet::parse("noopener");
        assert!(features.enabled("noopener"));
        assert!(!features.enabled("noreferrer"));
    }

    #[test]
    fn enabled_accepts_yes_one_and_true() {
        let features = FeatureSet::parse("toolbar=yes,status=1,resizable=true,menubar=no");
        assert!(features.enabled("toolbar"));
        assert!(features.enabled("status"));
        assert!(features.enabled("resizable"));
        assert!(!features.enabled("menubar"));
    }

    #[test]
    fn tolerates_whitespace_and_empty_segments() {
        let features = FeatureSet::parse(" width = 500 , , height=400 ");
        assert_eq!(features.number("width"), Some(500));
        assert_eq!(features.number("height"), Some(400));
    }

    #[test]
    fn later_duplicates_win() {
        let features = FeatureSet::parse("width=300,width=800");
        assert_eq!(features.number("width"), Some(800));
    }

    #[test]
    fn empty_string_parses_to_empty_set() {
        let features = FeatureSet::parse("");
        assert!(features.is_empty());
    }

    #[test]
    fn renders_back_to_canonical_comma_form() {
        let raw = "width=400,height=300,noopener";
        let features = FeatureSet::parse(raw);
        assert_eq!(features.to_string(), raw);
    }

    #[test]
    fn comprehensive_feature_string_round_trips() {
        let raw = "width=800,height=600,left=100,top=100,toolbar=yes,menubar=yes,\
                   location=yes,status=yes,scrollbars=yes,resizable=yes";
        let features = FeatureSet::parse(&raw.replace(' ', ""));
        assert_eq!(features.number("left"), Some(100));
        assert!(features.enabled("scrollbars"));
    }
}
