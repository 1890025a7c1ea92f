//! Status snapshot published on every state entry.

use crate::candidate::Alignment;
use crate::core::Stage;
use crate::roster::Roster;
use serde::{Deserialize, Serialize};

/// The machine's state plus its focus candidate, if any.
///
/// Serializes to JSON with dotted keys; the recruit fields are `null`
/// when no candidate is in focus:
///
/// ```json
/// {"machine.state":"intake","recruit.name":null,"recruit.strength":null,"recruit.alignment":null}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(rename = "machine.state")]
    pub state: Stage,
    #[serde(rename = "recruit.name")]
    pub name: Option<String>,
    #[serde(rename = "recruit.strength")]
    pub strength: Option<u32>,
    #[serde(rename = "recruit.alignment")]
    pub alignment: Option<Alignment>,
}

impl StatusSnapshot {
    pub fn capture(state: Stage, roster: &Roster) -> Self {
        let focus = roster.focus();
        Self {
            state,
            name: focus.map(|c| c.name().to_string()),
            strength: focus.map(|c| c.strength()),
            alignment: focus.map(|c| c.alignment()),
        }
    }

    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_payload(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use serde_json::{json, Value};

    #[test]
    fn empty_focus_serializes_nulls() {
        let snapshot = StatusSnapshot::capture(Stage::Intake, &Roster::new());
        let value: Value = serde_json::from_slice(&snapshot.to_payload().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "machine.state": "intake",
                "recruit.name": null,
                "recruit.strength": null,
                "recruit.alignment": null,
            })
        );
    }

    #[test]
    fn focus_fields_are_captured() {
        let mut roster = Roster::new();
        roster.admit(Candidate::new("Ann", 12, Alignment::Evil));

        let snapshot = StatusSnapshot::capture(Stage::Accept, &roster);
        let value: Value = serde_json::from_slice(&snapshot.to_payload().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "machine.state": "accept",
                "recruit.name": "Ann",
                "recruit.strength": 12,
                "recruit.alignment": "evil",
            })
        );
    }

    #[test]
    fn payload_decodes_back() {
        let mut roster = Roster::new();
        roster.admit(Candidate::new("Bob", 5, Alignment::Good));
        let snapshot = StatusSnapshot::capture(Stage::Decline, &roster);

        let decoded = StatusSnapshot::from_payload(&snapshot.to_payload().unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
