//! Placeholder values for parameters the model left out.

use compact_str::CompactString;
use pcore::{Param, ParamType, Value};
use std::collections::BTreeMap;

/// Guesses a value for a string parameter from its declaration alone.
///
/// Used when the model packed everything into a single free-text `input`
/// argument. Values produced here are tagged [`crate::Origin::Inferred`].
pub trait Heuristics: Send + Sync {
    /// A placeholder for the parameter, if one can be guessed.
    fn placeholder(&self, param: &Param) -> Option<Value>;
}

/// Keyword table matched against the segments of a parameter name.
///
/// `fromCurrency` splits into `from` and `currency`; the first segment with
/// a table entry decides. Closed-set parameters without a match take their
/// first allowed value.
#[derive(Debug, Clone)]
pub struct KeywordHeuristics {
    table: BTreeMap<CompactString, Value>,
}

impl KeywordHeuristics {
    /// Create a policy with an empty table
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Set the placeholder for a keyword
    pub fn with_placeholder(mut self, keyword: &str, value: impl Into<Value>) -> Self {
        self.table
            .insert(CompactString::from(keyword.to_lowercase()), value.into());
        self
    }
}

impl Default for KeywordHeuristics {
    fn default() -> Self {
        Self::empty()
            .with_placeholder("from", "USD")
            .with_placeholder("to", "EUR")
            .with_placeholder("currency", "USD")
            .with_placeholder("location", "London")
            .with_placeholder("city", "London")
            .with_placeholder("unit", "celsius")
    }
}

impl Heuristics for KeywordHeuristics {
    fn placeholder(&self, param: &Param) -> Option<Value> {
        let matched = segments(&param.name)
            .iter()
            .find_map(|segment| self.table.get(segment.as_str()))
            .cloned();
        matched.or_else(|| match &param.ty {
            ParamType::Enum(values) => values.first().map(|v| Value::from(v.as_str())),
            _ => None,
        })
    }
}

/// Split an identifier into lowercase words at `_`, `-` and camelCase humps.
pub fn segments(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_identifiers() {
        assert_eq!(segments("fromCurrency"), vec!["from", "currency"]);
        assert_eq!(segments("to_currency"), vec!["to", "currency"]);
        assert_eq!(segments("HTTPStatus"), vec!["httpstatus"]);
        assert_eq!(segments("maxResults"), vec!["max", "results"]);
        assert!(segments("").is_empty());
    }

    #[test]
    fn first_matching_segment_wins() {
        let policy = KeywordHeuristics::default();
        assert_eq!(
            policy.placeholder(&Param::string("toCurrency")),
            Some(Value::from("EUR"))
        );
        assert_eq!(
            policy.placeholder(&Param::string("currency")),
            Some(Value::from("USD"))
        );
        assert_eq!(policy.placeholder(&Param::string("query")), None);
    }

    #[test]
    fn overrides_replace_defaults() {
        let policy = KeywordHeuristics::default().with_placeholder("City", "Paris");
        assert_eq!(
            policy.placeholder(&Param::string("city")),
            Some(Value::from("Paris"))
        );
    }

    #[test]
    fn enum_falls_back_to_first_value() {
        let policy = KeywordHeuristics::empty();
        let param = Param::one_of("difficulty", ["easy", "moderate"]);
        assert_eq!(policy.placeholder(&param), Some(Value::from("easy")));
    }
}
