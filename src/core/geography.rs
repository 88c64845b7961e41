use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DashboardError, DashboardResult};

/// One of the 27 Brazilian federative units.
///
/// The code/name table is a fixed bijection. Codes and names outside it are
/// not representable; lookups return `None` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateCode {
    AC,
    AL,
    AM,
    AP,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MG,
    MS,
    MT,
    PA,
    PB,
    PE,
    PI,
    PR,
    RJ,
    RN,
    RO,
    RR,
    RS,
    SC,
    SE,
    SP,
    TO,
}

const STATE_TABLE: [(StateCode, &str, &str); 27] = [
    (StateCode::AC, "AC", "Acre"),
    (StateCode::AL, "AL", "Alagoas"),
    (StateCode::AM, "AM", "Amazonas"),
    (StateCode::AP, "AP", "Amapá"),
    (StateCode::BA, "BA", "Bahia"),
    (StateCode::CE, "CE", "Ceará"),
    (StateCode::DF, "DF", "Distrito Federal"),
    (StateCode::ES, "ES", "Espírito Santo"),
    (StateCode::GO, "GO", "Goiás"),
    (StateCode::MA, "MA", "Maranhão"),
    (StateCode::MG, "MG", "Minas Gerais"),
    (StateCode::MS, "MS", "Mato Grosso do Sul"),
    (StateCode::MT, "MT", "Mato Grosso"),
    (StateCode::PA, "PA", "Pará"),
    (StateCode::PB, "PB", "Paraíba"),
    (StateCode::PE, "PE", "Pernambuco"),
    (StateCode::PI, "PI", "Piauí"),
    (StateCode::PR, "PR", "Paraná"),
    (StateCode::RJ, "RJ", "Rio de Janeiro"),
    (StateCode::RN, "RN", "Rio Grande do Norte"),
    (StateCode::RO, "RO", "Rondônia"),
    (StateCode::RR, "RR", "Roraima"),
    (StateCode::RS, "RS", "Rio Grande do Sul"),
    (StateCode::SC, "SC", "Santa Catarina"),
    (StateCode::SE, "SE", "Sergipe"),
    (StateCode::SP, "SP", "São Paulo"),
    (StateCode::TO, "TO", "Tocantins"),
];

impl StateCode {
    /// All states, ordered by code.
    pub const ALL: [StateCode; 27] = [
        Self::AC,
        Self::AL,
        Self::AM,
        Self::AP,
        Self::BA,
        Self::CE,
        Self::DF,
        Self::ES,
        Self::GO,
        Self::MA,
        Self::MG,
        Self::MS,
        Self::MT,
        Self::PA,
        Self::PB,
        Self::PE,
        Self::PI,
        Self::PR,
        Self::RJ,
        Self::RN,
        Self::RO,
        Self::RR,
        Self::RS,
        Self::SC,
        Self::SE,
        Self::SP,
        Self::TO,
    ];

    /// Resolves a two-letter code, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        STATE_TABLE
            .iter()
            .find(|(_, entry_code, _)| entry_code.eq_ignore_ascii_case(code))
            .map(|(state, _, _)| *state)
    }

    /// Resolves a full state name as it appears in boundary data.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        STATE_TABLE
            .iter()
            .find(|(_, _, entry_name)| *entry_name == name)
            .map(|(state, _, _)| *state)
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        STATE_TABLE[self.index()].1
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        STATE_TABLE[self.index()].2
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StateCode {
    type Err = DashboardError;

    fn from_str(s: &str) -> DashboardResult<Self> {
        Self::from_code(s)
            .ok_or_else(|| DashboardError::InvalidData(format!("unknown state code `{s}`")))
    }
}

impl Serialize for StateCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for StateCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_code(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown state code `{raw}`")))
    }
}

/// One boundary feature as supplied by the geography collaborator.
///
/// Only the name is consumed here; the geometry is opaque and forwarded to the
/// rendering layer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    pub properties: BoundaryProperties,
    #[serde(default)]
    pub geometry: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryProperties {
    pub name: String,
}

/// Feature collection of state boundaries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeographyBoundaries {
    #[serde(default)]
    pub features: Vec<BoundaryFeature>,
}

impl GeographyBoundaries {
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            DashboardError::InvalidData(format!("failed to parse geography boundaries: {e}"))
        })
    }

    /// Builds a geometry-less collection naming every state. Useful for hosts
    /// that render without shapes.
    #[must_use]
    pub fn from_state_names() -> Self {
        Self {
            features: StateCode::ALL
                .iter()
                .map(|state| BoundaryFeature {
                    properties: BoundaryProperties {
                        name: state.name().to_owned(),
                    },
                    geometry: serde_json::Value::Null,
                })
                .collect(),
        }
    }

    /// Feature names paired with their resolved code, in feature order.
    pub fn resolved_regions(&self) -> impl Iterator<Item = (&str, Option<StateCode>)> {
        self.features.iter().map(|feature| {
            let name = feature.properties.name.as_str();
            (name, StateCode::from_name(name))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_a_bijection() {
        for state in StateCode::ALL {
            assert_eq!(StateCode::from_code(state.code()), Some(state));
            assert_eq!(StateCode::from_name(state.name()), Some(state));
        }
        let mut names: Vec<&str> = StateCode::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 27);
    }

    #[test]
    fn table_order_matches_enum_discriminants() {
        for (index, (state, _, _)) in STATE_TABLE.iter().enumerate() {
            assert_eq!(*state as usize, index);
            assert_eq!(StateCode::ALL[index], *state);
        }
    }

    #[test]
    fn unknown_inputs_resolve_to_none() {
        assert_eq!(StateCode::from_code("XX"), None);
        assert_eq!(StateCode::from_code(""), None);
        assert_eq!(StateCode::from_name("Sao Paulo"), None);
        assert_eq!(StateCode::from_code(" sp "), Some(StateCode::SP));
    }
}
