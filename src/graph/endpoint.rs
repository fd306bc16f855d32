//! Endpoint marks and the canonical edge-type vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mark attached to one side of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Tail,
    Arrow,
    Circle,
    /// Placeholder mark of a "probabilistic absence" edge
    Null,
}

impl Endpoint {
    /// Display symbol for an ordered endpoint pair, e.g. `-->` for (Tail, Arrow)
    pub fn pair_symbol(endpoint1: Endpoint, endpoint2: Endpoint) -> &'static str {
        match EdgeType::from_endpoints(endpoint1, endpoint2) {
            EdgeType::Nil if endpoint1 == Endpoint::Null && endpoint2 == Endpoint::Null => "...",
            EdgeType::Nil => "   ",
            edge_type => edge_type.symbol(),
        }
    }
}

/// Symbolic type of an edge as seen from a fixed (node1, node2) order.
///
/// Declaration order is the rank used to break probability ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// `-->`
    Ta,
    /// `<--`
    At,
    /// `o->`
    Ca,
    /// `<-o`
    Ac,
    /// `o-o`
    Cc,
    /// `<->`
    Aa,
    /// `---`
    Tt,
    /// No structural edge
    Nil,
}

impl EdgeType {
    pub const ALL: [EdgeType; 8] = [
        EdgeType::Ta,
        EdgeType::At,
        EdgeType::Ca,
        EdgeType::Ac,
        EdgeType::Cc,
        EdgeType::Aa,
        EdgeType::Tt,
        EdgeType::Nil,
    ];

    /// Classify the proximal marks at (node1, node2).
    ///
    /// Total: any combination outside the seven real patterns is `Nil`.
    pub fn from_endpoints(endpoint1: Endpoint, endpoint2: Endpoint) -> Self {
        use Endpoint::*;
        match (endpoint1, endpoint2) {
            (Tail, Arrow) => EdgeType::Ta,
            (Arrow, Tail) => EdgeType::At,
            (Circle, Arrow) => EdgeType::Ca,
            (Arrow, Circle) => EdgeType::Ac,
            (Circle, Circle) => EdgeType::Cc,
            (Arrow, Arrow) => EdgeType::Aa,
            (Tail, Tail) => EdgeType::Tt,
            _ => EdgeType::Nil,
        }
    }

    /// Endpoint marks that realize this type between (node1, node2)
    pub fn endpoints(self) -> (Endpoint, Endpoint) {
        use Endpoint::*;
        match self {
            EdgeType::Ta => (Tail, Arrow),
            EdgeType::At => (Arrow, Tail),
            EdgeType::Ca => (Circle, Arrow),
            EdgeType::Ac => (Arrow, Circle),
            EdgeType::Cc => (Circle, Circle),
            EdgeType::Aa => (Arrow, Arrow),
            EdgeType::Tt => (Tail, Tail),
            EdgeType::Nil => (Null, Null),
        }
    }

    /// The same edge seen with node order swapped. Self-inverse.
    pub fn reverse(self) -> Self {
        match self {
            EdgeType::Ta => EdgeType::At,
            EdgeType::At => EdgeType::Ta,
            EdgeType::Ca => EdgeType::Ac,
            EdgeType::Ac => EdgeType::Ca,
            other => other,
        }
    }

    /// Whether reversing the node order changes the type
    pub fn is_asymmetric(self) -> bool {
        self.reverse() != self
    }

    pub fn symbol(self) -> &'static str {
        match self {
            EdgeType::Ta => "-->",
            EdgeType::At => "<--",
            EdgeType::Ca => "o->",
            EdgeType::Ac => "<-o",
            EdgeType::Cc => "o-o",
            EdgeType::Aa => "<->",
            EdgeType::Tt => "---",
            EdgeType::Nil => "...",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EdgeType::Ta => "ta",
            EdgeType::At => "at",
            EdgeType::Ca => "ca",
            EdgeType::Ac => "ac",
            EdgeType::Cc => "cc",
            EdgeType::Aa => "aa",
            EdgeType::Tt => "tt",
            EdgeType::Nil => "nil",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized edge-type name or symbol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown edge type: {0}")]
pub struct ParseEdgeTypeError(String);

impl FromStr for EdgeType {
    type Err = ParseEdgeTypeError;

    /// Accepts either the short name (`ta`) or the symbol (`-->`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        EdgeType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(trimmed) || t.symbol() == trimmed)
            .ok_or_else(|| ParseEdgeTypeError(s.to_string()))
    }
}

/// Categorical annotations a search may attach to a PAG edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeProperty {
    /// Definitely direct
    Dd,
    /// No latent confounder
    Nl,
    /// Possibly direct
    Pd,
    /// Possible latent confounder
    Pl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_is_an_involution() {
        for t in EdgeType::ALL {
            assert_eq!(t.reverse().reverse(), t);
        }
    }

    #[test]
    fn reverse_pairs() {
        assert_eq!(EdgeType::Ta.reverse(), EdgeType::At);
        assert_eq!(EdgeType::Ca.reverse(), EdgeType::Ac);
        assert_eq!(EdgeType::Aa.reverse(), EdgeType::Aa);
        assert_eq!(EdgeType::Cc.reverse(), EdgeType::Cc);
        assert_eq!(EdgeType::Tt.reverse(), EdgeType::Tt);
        assert_eq!(EdgeType::Nil.reverse(), EdgeType::Nil);
    }

    #[test]
    fn endpoints_round_trip_for_real_types() {
        for t in EdgeType::ALL {
            let (e1, e2) = t.endpoints();
            assert_eq!(EdgeType::from_endpoints(e1, e2), t);
        }
    }

    #[test]
    fn unmatched_marks_are_nil() {
        assert_eq!(EdgeType::from_endpoints(Endpoint::Tail, Endpoint::Circle), EdgeType::Nil);
        assert_eq!(EdgeType::from_endpoints(Endpoint::Null, Endpoint::Arrow), EdgeType::Nil);
        assert_eq!(Endpoint::pair_symbol(Endpoint::Tail, Endpoint::Circle), "   ");
        assert_eq!(Endpoint::pair_symbol(Endpoint::Null, Endpoint::Null), "...");
        assert_eq!(Endpoint::pair_symbol(Endpoint::Circle, Endpoint::Arrow), "o->");
    }

    #[test]
    fn asymmetric_family() {
        let asymmetric: Vec<_> = EdgeType::ALL.into_iter().filter(|t| t.is_asymmetric()).collect();
        assert_eq!(asymmetric, vec![EdgeType::Ta, EdgeType::At, EdgeType::Ca, EdgeType::Ac]);
    }

    #[test]
    fn parses_names_and_symbols() {
        assert_eq!("ta".parse::<EdgeType>().unwrap(), EdgeType::Ta);
        assert_eq!("NIL".parse::<EdgeType>().unwrap(), EdgeType::Nil);
        assert_eq!("<-o".parse::<EdgeType>().unwrap(), EdgeType::Ac);
        assert!("xx".parse::<EdgeType>().is_err());
    }
}
