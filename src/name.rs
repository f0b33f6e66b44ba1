//! Domain name representation: ordered labels, most-significant last.
//!
//! `"www.example.com"` is stored as `["www", "example", "com"]`, i.e. the
//! least-significant label first. Names are normalized on construction:
//! ASCII-lowercased, a single trailing dot stripped. Validation follows the
//! classic DNS limits (63 bytes per label, 255 bytes per name).

use std::fmt;
use std::str::FromStr;

use crate::errors::NameError;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

/// An immutable hierarchical domain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    /// Builds a name from labels given least-significant first. Labels are
    /// ASCII-lowercased, the same normalization parsing applies.
    pub fn new(labels: Vec<String>) -> Result<Self, NameError> {
        if labels.is_empty() {
            return Err(NameError::Empty);
        }
        let labels: Vec<String> = labels
            .into_iter()
            .map(|l| l.to_ascii_lowercase())
            .collect();
        for label in &labels {
            validate_label(label)?;
        }
        let total = labels.iter().map(|l| l.len()).sum::<usize>() + labels.len() - 1;
        if total > MAX_NAME_LEN {
            return Err(NameError::NameTooLong(total));
        }
        Ok(Self { labels })
    }

    /// Internal constructor for labels already known to be valid, e.g. read
    /// back out of the tree.
    pub(crate) fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Labels in storage order, least-significant first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// True iff `self` equals `ancestor` or lies strictly below it in the
    /// label hierarchy.
    pub fn is_subdomain(&self, ancestor: &DomainName) -> bool {
        let n = self.labels.len();
        let m = ancestor.labels.len();
        m <= n && self.labels[n - m..] == ancestor.labels[..]
    }

    /// The name with its least-significant label removed, or `None` for a
    /// single-label name.
    pub fn parent(&self) -> Option<DomainName> {
        if self.labels.len() > 1 {
            Some(Self {
                labels: self.labels[1..].to_vec(),
            })
        } else {
            None
        }
    }
}

fn validate_label(label: &str) -> Result<(), NameError> {
    if label.is_empty() {
        return Err(NameError::EmptyLabel);
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(NameError::LabelTooLong(label.to_string()));
    }
    for ch in label.chars() {
        if ch.is_whitespace() || ch.is_control() || ch == '.' {
            return Err(NameError::InvalidCharacter {
                label: label.to_string(),
                ch,
            });
        }
    }
    Ok(())
}

impl FromStr for DomainName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix('.').unwrap_or(s);
        if s.is_empty() {
            return Err(NameError::Empty);
        }
        let labels = s
            .split('.')
            .map(|l| l.to_ascii_lowercase())
            .collect::<Vec<_>>();
        Self::new(labels)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("www.example.com", &["www", "example", "com"])]
    #[case("WWW.Example.COM", &["www", "example", "com"])]
    #[case("example.com.", &["example", "com"])]
    #[case("org", &["org"])]
    fn given_valid_input_when_parsing_then_normalizes_labels(
        #[case] input: &str,
        #[case] expected: &[&str],
    ) {
        let name: DomainName = input.parse().unwrap();
        assert_eq!(name.labels(), expected);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("a..b")]
    #[case(".example.com")]
    fn given_malformed_input_when_parsing_then_fails(#[case] input: &str) {
        assert!(input.parse::<DomainName>().is_err());
    }

    #[test]
    fn given_mixed_case_labels_when_constructing_then_normalizes_like_parsing() {
        let constructed = DomainName::new(vec![
            "WWW".to_string(),
            "Example".to_string(),
            "COM".to_string(),
        ])
        .unwrap();
        let parsed: DomainName = "www.example.com".parse().unwrap();
        assert_eq!(constructed, parsed);
        assert_eq!(constructed.labels(), &["www", "example", "com"]);
    }

    #[test]
    fn given_oversized_label_when_parsing_then_fails() {
        let label = "a".repeat(64);
        let err = format!("{label}.com").parse::<DomainName>().unwrap_err();
        assert_eq!(err, NameError::LabelTooLong(label));
    }

    #[test]
    fn given_oversized_name_when_parsing_then_fails() {
        let long = (0..8)
            .map(|_| "a".repeat(32))
            .collect::<Vec<_>>()
            .join(".");
        assert!(matches!(
            long.parse::<DomainName>(),
            Err(NameError::NameTooLong(_))
        ));
    }

    #[rstest]
    #[case("www.example.com", "example.com", true)]
    #[case("example.com", "example.com", true)]
    #[case("example.com", "www.example.com", false)]
    #[case("example.org", "example.com", false)]
    #[case("notexample.com", "example.com", false)]
    #[case("a.b.c.example.com", "com", true)]
    fn given_two_names_when_testing_containment_then_matches_suffix_rule(
        #[case] candidate: &str,
        #[case] ancestor: &str,
        #[case] expected: bool,
    ) {
        let candidate: DomainName = candidate.parse().unwrap();
        let ancestor: DomainName = ancestor.parse().unwrap();
        assert_eq!(candidate.is_subdomain(&ancestor), expected);
    }

    #[test]
    fn given_name_when_taking_parent_then_drops_least_significant_label() {
        let name: DomainName = "www.example.com".parse().unwrap();
        let parent = name.parent().unwrap();
        assert_eq!(parent.to_string(), "example.com");
        assert_eq!(parent.parent().unwrap().to_string(), "com");
        assert!(parent.parent().unwrap().parent().is_none());
    }

    #[test]
    fn given_name_when_displaying_then_round_trips() {
        let name: DomainName = "www.example.com.".parse().unwrap();
        assert_eq!(name.to_string(), "www.example.com");
    }
}
