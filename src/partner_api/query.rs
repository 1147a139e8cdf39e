//! Fixed registry of persisted partner-API queries and their request envelope.

// self
use crate::_prelude::*;

/// Persisted-query protocol version sent in every envelope.
pub const PERSISTED_QUERY_VERSION: u32 = 1;

/// A registered partner-API query: the logical name callers use, the GraphQL operation it maps
/// to, and the hash of the persisted query on the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryDefinition {
	/// Logical name used by callers.
	pub name: &'static str,
	/// GraphQL operation name sent to the server.
	pub operation_name: &'static str,
	/// SHA-256 hash of the persisted query.
	pub sha256_hash: &'static str,
}
impl QueryDefinition {
	/// Looks up a registered query by its logical name.
	pub fn find(name: &str) -> Option<&'static QueryDefinition> {
		QUERIES.iter().find(|query| query.name == name)
	}

	/// All registered queries.
	pub fn all() -> &'static [QueryDefinition] {
		&QUERIES
	}

	/// Builds the persisted-query request envelope for `variables`.
	pub fn request_body(&self, variables: Value) -> Value {
		json!({
			"variables": variables,
			"operationName": self.operation_name,
			"extensions": {
				"persistedQuery": {
					"version": PERSISTED_QUERY_VERSION,
					"sha256Hash": self.sha256_hash,
				},
			},
		})
	}
}

static QUERIES: [QueryDefinition; 5] = [
	QueryDefinition {
		name: "getTrack",
		operation_name: "getTrack",
		sha256_hash: "612585ae06ba435ad26369870deaae23b5c8800a256cd8a57e08eddc25a37294",
	},
	QueryDefinition {
		name: "getAlbum",
		operation_name: "getAlbum",
		sha256_hash: "b9bfabef66ed756e5e13f68a942deb60bd4125ec1f1be8cc42769dc0259b4b10",
	},
	QueryDefinition {
		name: "getPlaylist",
		operation_name: "fetchPlaylist",
		sha256_hash: "bb67e0af06e8d6f52b531f97468ee4acd44cd0f82b988e15c2ea47b1148efc77",
	},
	QueryDefinition {
		name: "getArtist",
		operation_name: "queryArtistOverview",
		sha256_hash: "35648a112beb1794e39ab931365f6ae4a8d45e65396d641eeda94e4003d41497",
	},
	QueryDefinition {
		name: "searchDesktop",
		operation_name: "searchDesktop",
		sha256_hash: "fcad5a3e0d5af727fb76966f06971c19cfa2275e6ff7671196753e008611873c",
	},
];
