//! Core type definitions for the route graph

use super::store::GraphError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Unique node label (e.g., "A", "Madrid")
///
/// Surrounding whitespace is trimmed; an empty label is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct NodeName(String);

impl NodeName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, GraphError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GraphError::InvalidNodeName(name.as_ref().to_string()));
        }
        Ok(NodeName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for NodeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeName {
    type Error = GraphError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        NodeName::new(s)
    }
}

impl TryFrom<&str> for NodeName {
    type Error = GraphError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        NodeName::new(s)
    }
}

impl From<NodeName> for String {
    fn from(name: NodeName) -> Self {
        name.0
    }
}

/// Edge weight: any finite real number
///
/// Negative weights are stored; shortest paths over them are best effort.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct EdgeWeight(f64);

impl EdgeWeight {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }
}

impl TryFrom<f64> for EdgeWeight {
    type Error = GraphError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(GraphError::InvalidWeight {
                input: value.to_string(),
                reason: "not a number",
            });
        }
        if value.is_infinite() {
            return Err(GraphError::InvalidWeight {
                input: value.to_string(),
                reason: "must be finite",
            });
        }
        Ok(EdgeWeight(value))
    }
}

impl FromStr for EdgeWeight {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| GraphError::InvalidWeight {
            input: s.to_string(),
            reason: "not a number",
        })?;
        EdgeWeight::try_from(value).map_err(|err| match err {
            GraphError::InvalidWeight { reason, .. } => GraphError::InvalidWeight {
                input: s.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl From<EdgeWeight> for f64 {
    fn from(weight: EdgeWeight) -> Self {
        weight.0
    }
}

impl fmt::Display for EdgeWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_name() {
        let name = NodeName::new("  Madrid ").unwrap();
        assert_eq!(name.as_str(), "Madrid");
        assert_eq!(format!("{}", name), "Madrid");

        let name2: NodeName = "B".try_into().unwrap();
        assert!(name2 < NodeName::new("C").unwrap());
    }

    #[test]
    fn test_node_name_rejects_blank() {
        assert_eq!(
            NodeName::new("   "),
            Err(GraphError::InvalidNodeName("   ".to_string()))
        );
        assert!(NodeName::new("").is_err());
    }

    #[test]
    fn test_weight_parse() {
        assert_eq!("2.5".parse::<EdgeWeight>().unwrap().value(), 2.5);
        assert_eq!(" 7 ".parse::<EdgeWeight>().unwrap().value(), 7.0);
        assert!("-3".parse::<EdgeWeight>().unwrap().is_negative());
    }

    #[test]
    fn test_weight_rejects_garbage() {
        for input in ["", "abc", "1.2.3", "NaN", "inf", "-infinity", "1e999"] {
            let err = input.parse::<EdgeWeight>().unwrap_err();
            assert!(err.is_validation(), "{input:?} should be rejected");
        }
        assert!(EdgeWeight::try_from(f64::NAN).is_err());
        assert!(EdgeWeight::try_from(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let name: NodeName = serde_json::from_str("\" A \"").unwrap();
        assert_eq!(name.as_str(), "A");
        assert!(serde_json::from_str::<NodeName>("\"  \"").is_err());

        assert_eq!(serde_json::to_string(&EdgeWeight::try_from(1.5).unwrap()).unwrap(), "1.5");
        assert!(serde_json::from_str::<EdgeWeight>("null").is_err());
    }
}
