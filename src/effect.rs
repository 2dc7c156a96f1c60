use {
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The outcome a statement declares. Matching is case-sensitive: `"allow"` is not an effect.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    /// Parse the exact JSON string form of an effect.
    pub fn from_json_str(s: &str) -> Option<Self> {
        match s {
            "Allow" => Some(Self::Allow),
            "Deny" => Some(Self::Deny),
            _ => None,
        }
    }

    #[inline]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Allow => f.write_str("Allow"),
            Self::Deny => f.write_str("Deny"),
        }
    }
}

#[cfg(test)]
mod tests {
    use {crate::Effect, pretty_assertions::assert_eq, std::collections::HashMap};

    #[test_log::test]
    fn test_hash() {
        let mut hash_map = HashMap::new();
        hash_map.insert(Effect::Allow, 1);
        hash_map.insert(Effect::Deny, 2);

        assert_eq!(hash_map.get(&Effect::Allow), Some(&1));
        assert_eq!(hash_map.get(&Effect::Deny), Some(&2));
    }

    #[test_log::test]
    fn test_display() {
        assert_eq!(format!("{}", Effect::Allow), "Allow");
        assert_eq!(format!("{}", Effect::Deny), "Deny");
    }

    #[test_log::test]
    fn test_case_sensitive() {
        assert_eq!(Effect::from_json_str("Allow"), Some(Effect::Allow));
        assert_eq!(Effect::from_json_str("Deny"), Some(Effect::Deny));
        assert_eq!(Effect::from_json_str("allow"), None);
        assert_eq!(Effect::from_json_str(""), None);
        assert!(serde_json::from_str::<Effect>(r#""DENY""#).is_err());
        assert_eq!(serde_json::from_str::<Effect>(r#""Deny""#).unwrap(), Effect::Deny);
        assert!(Effect::Allow.is_allow());
        assert!(!Effect::Deny.is_allow());
    }
}
