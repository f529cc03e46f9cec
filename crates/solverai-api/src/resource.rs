use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kinds of resources held by the data manager.
///
/// The `Display` form is the endpoint path segment of the kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ResourceKind {
    #[strum(to_string = "equations", serialize = "equation")]
    Equation,
    #[strum(to_string = "code", serialize = "codes")]
    Code,
    #[strum(to_string = "hard-datas", serialize = "hard-data", serialize = "harddata")]
    HardData,
    #[strum(to_string = "soft-datas", serialize = "soft-data", serialize = "softdata")]
    SoftData,
    #[strum(to_string = "problems", serialize = "problem")]
    Problem,
}

impl ResourceKind {
    /// Kinds that a problem references. They can only be deleted once no problem points to them.
    pub const MODULES: [ResourceKind; 4] = [
        ResourceKind::Equation,
        ResourceKind::Code,
        ResourceKind::HardData,
        ResourceKind::SoftData,
    ];

    /// Field of a problem document listing the ids of this kind.
    pub fn problem_field(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Equation => Some("equations"),
            ResourceKind::Code => Some("codes"),
            ResourceKind::HardData => Some("harddatas"),
            ResourceKind::SoftData => Some("softdatas"),
            ResourceKind::Problem => None,
        }
    }
}

/// Identifier assigned by the data manager.
///
/// The services hand out numeric ids, but ids read back from older ids files or typed on the
/// command line may be strings. Both are sent back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Text(String),
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{id}"),
            ResourceId::Text(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for ResourceId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(id) => ResourceId::Int(id),
            Err(_) => ResourceId::Text(s.to_string()),
        })
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Text(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ResourceKind::Equation, "equations")]
    #[case(ResourceKind::Code, "code")]
    #[case(ResourceKind::HardData, "hard-datas")]
    #[case(ResourceKind::SoftData, "soft-datas")]
    #[case(ResourceKind::Problem, "problems")]
    fn kinds_map_to_endpoint_segments(#[case] kind: ResourceKind, #[case] segment: &str) {
        assert_eq!(kind.to_string(), segment);
        assert_eq!(segment.parse::<ResourceKind>(), Ok(kind));
    }

    #[test]
    fn kinds_accept_singular_names() {
        assert_eq!("hard-data".parse::<ResourceKind>(), Ok(ResourceKind::HardData));
        assert_eq!("Problem".parse::<ResourceKind>(), Ok(ResourceKind::Problem));
    }

    #[test]
    fn ids_keep_their_json_shape() {
        let ids: Vec<ResourceId> = serde_json::from_str(r#"[12, "ab-3"]"#).unwrap();
        assert_eq!(ids, vec![ResourceId::Int(12), ResourceId::Text("ab-3".into())]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[12,"ab-3"]"#);
    }

    #[test]
    fn numeric_strings_parse_as_ints() {
        assert_eq!("42".parse::<ResourceId>(), Ok(ResourceId::Int(42)));
        assert_eq!("x42".parse::<ResourceId>(), Ok(ResourceId::Text("x42".into())));
    }
}
