//! Value objects for the registry store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application identifier: `GI` followed by a zero-padded sequence.
///
/// The sequence starts at 1 and is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationId(u32);

impl ApplicationId {
    pub const PREFIX: &'static str = "GI";

    pub fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    pub fn sequence(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", Self::PREFIX, self.0)
    }
}

impl FromStr for ApplicationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(Self::PREFIX)
            .filter(|d| d.len() >= 3 && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| format!("malformed application id '{}'", s))?;
        match digits.parse::<u32>() {
            Ok(seq) if seq > 0 => Ok(Self(seq)),
            _ => Err(format!("malformed application id '{}'", s)),
        }
    }
}

impl TryFrom<String> for ApplicationId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApplicationId> for String {
    fn from(id: ApplicationId) -> Self {
        id.to_string()
    }
}

/// Category values offered by the filing form. The category field itself
/// is open; these are hints, not a constraint.
pub const KNOWN_CATEGORIES: [&str; 6] = [
    "Agricultural",
    "Handicraft",
    "Textiles",
    "Food Products",
    "Natural Products",
    "Manufactured Goods",
];

macro_rules! districts {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Karnataka district. Closed set.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum District {
            $($variant),+
        }

        impl District {
            /// All districts in alphabetical order.
            pub const ALL: &'static [District] = &[$(District::$variant),+];

            /// Display name, as used on the filing form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(District::$variant => $name),+
                }
            }
        }
    };
}

districts! {
    Bagalkot => "Bagalkot",
    Ballari => "Ballari",
    Belagavi => "Belagavi",
    BengaluruRural => "Bengaluru Rural",
    BengaluruUrban => "Bengaluru Urban",
    Bidar => "Bidar",
    Chamarajanagar => "Chamarajanagar",
    Chikballapur => "Chikballapur",
    Chikkamagaluru => "Chikkamagaluru",
    Chitradurga => "Chitradurga",
    DakshinaKannada => "Dakshina Kannada",
    Davanagere => "Davanagere",
    Dharwad => "Dharwad",
    Gadag => "Gadag",
    Hassan => "Hassan",
    Haveri => "Haveri",
    Kalaburagi => "Kalaburagi",
    Kodagu => "Kodagu",
    Kolar => "Kolar",
    Koppal => "Koppal",
    Mandya => "Mandya",
    Mysuru => "Mysuru",
    Raichur => "Raichur",
    Ramanagara => "Ramanagara",
    Shivamogga => "Shivamogga",
    Tumakuru => "Tumakuru",
    Udupi => "Udupi",
    UttaraKannada => "Uttara Kannada",
    Vijayapura => "Vijayapura",
    Yadgir => "Yadgir",
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for District {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        District::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| format!("'{}' is not a Karnataka district", wanted))
    }
}

impl TryFrom<String> for District {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<District> for String {
    fn from(d: District) -> Self {
        d.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_application_id_format() {
        assert_eq!(ApplicationId::new(3).to_string(), "GI003");
        assert_eq!(ApplicationId::new(42).to_string(), "GI042");
        assert_eq!(ApplicationId::new(1234).to_string(), "GI1234");
    }

    #[test]
    fn test_application_id_parse() {
        assert_eq!("GI007".parse::<ApplicationId>().unwrap(), ApplicationId::new(7));
        assert!("GI7".parse::<ApplicationId>().is_err());
        assert!("GI000".parse::<ApplicationId>().is_err());
        assert!("NONGI001".parse::<ApplicationId>().is_err());
        assert!("GI00x".parse::<ApplicationId>().is_err());
    }

    #[test]
    fn test_application_id_serializes_as_string() {
        let json = serde_json::to_string(&ApplicationId::new(1)).unwrap();
        assert_eq!(json, "\"GI001\"");
        let back: ApplicationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ApplicationId::new(1));
    }

    #[test]
    fn test_thirty_districts() {
        assert_eq!(District::ALL.len(), 30);
        assert_eq!("Udupi".parse::<District>().unwrap(), District::Udupi);
        assert_eq!(
            "Dakshina Kannada".parse::<District>().unwrap(),
            District::DakshinaKannada
        );
        assert!("Goa".parse::<District>().is_err());
        assert!("".parse::<District>().is_err());
    }

    #[test]
    fn test_districts_sorted_and_unique() {
        let names: Vec<_> = District::ALL.iter().map(|d| d.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    proptest! {
        #[test]
        fn prop_id_order_follows_sequence(a in 1u32..5000, b in 1u32..5000) {
            let (ia, ib) = (ApplicationId::new(a), ApplicationId::new(b));
            prop_assert_eq!(ia < ib, a < b);
            prop_assert_eq!(ia.to_string().parse::<ApplicationId>().unwrap(), ia);
        }
    }
}
