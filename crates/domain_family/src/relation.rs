//! Family relation categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family tie between a society member and a registered dependent
///
/// Wire names keep the portal's historical French vocabulary so existing
/// rows and clients keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Husband
    #[serde(rename = "epoux")]
    Husband,
    /// Wife
    #[serde(rename = "epouse")]
    Wife,
    /// Child
    #[serde(rename = "enfant")]
    Child,
    /// Father
    #[serde(rename = "pere")]
    Father,
    /// Mother
    #[serde(rename = "mere")]
    Mother,
    /// Step-father
    #[serde(rename = "beau_pere")]
    StepFather,
    /// Step-mother
    #[serde(rename = "belle_mere")]
    StepMother,
}

impl Relation {
    pub const ALL: [Relation; 7] = [
        Relation::Husband,
        Relation::Wife,
        Relation::Child,
        Relation::Father,
        Relation::Mother,
        Relation::StepFather,
        Relation::StepMother,
    ];

    /// Both spouse variants count against one shared quota
    pub fn is_spouse(&self) -> bool {
        matches!(self, Relation::Husband | Relation::Wife)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Husband => "epoux",
            Relation::Wife => "epouse",
            Relation::Child => "enfant",
            Relation::Father => "pere",
            Relation::Mother => "mere",
            Relation::StepFather => "beau_pere",
            Relation::StepMother => "belle_mere",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = UnknownRelation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "epoux" => Ok(Relation::Husband),
            "epouse" => Ok(Relation::Wife),
            "enfant" => Ok(Relation::Child),
            "pere" => Ok(Relation::Father),
            "mere" => Ok(Relation::Mother),
            "beau_pere" => Ok(Relation::StepFather),
            "belle_mere" => Ok(Relation::StepMother),
            other => Err(UnknownRelation(other.to_string())),
        }
    }
}

/// Error for relation strings outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation: {0}")]
pub struct UnknownRelation(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for relation in Relation::ALL {
            let parsed: Relation = relation.as_str().parse().unwrap();
            assert_eq!(parsed, relation);
        }
    }

    #[test]
    fn test_serde_uses_french_names() {
        let json = serde_json::to_string(&Relation::StepMother).unwrap();
        assert_eq!(json, "\"belle_mere\"");
    }

    #[test]
    fn test_unknown_relation_is_rejected() {
        assert!("cousin".parse::<Relation>().is_err());
    }

    #[test]
    fn test_spouse_variants() {
        assert!(Relation::Husband.is_spouse());
        assert!(Relation::Wife.is_spouse());
        assert!(!Relation::Child.is_spouse());
        assert!(!Relation::StepFather.is_spouse());
    }
}
