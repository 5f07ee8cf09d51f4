use std::collections::BTreeMap;

use json_comments::StripComments;
use serde::Deserialize;

/// On-disk registry dump: `{ "version": "...", "data": { name: id } }`.
///
/// Dumps are generated by a game-side tool and carry a licence/comment header,
/// so `/* */` and `//` comments are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryDump {
    /// Game version the dump was produced for.
    pub version: String,
    /// Human-facing name to namespaced identifier.
    pub data: BTreeMap<String, String>,
}

/// Parse a dump, ignoring comments.
pub fn parse_dump(input: &str) -> Result<RegistryDump, serde_json::Error> {
    serde_json::from_reader(StripComments::new(input.as_bytes()))
}
