//! User directory domain model.
//!
//! This module defines the `User` record and its nested address/company
//! structures as delivered by the remote directory endpoint. Records are
//! immutable once fetched: the page state replaces the whole collection on
//! every (re)fetch and never mutates individual entries.

use serde::{Deserialize, Serialize};

/// Geographic coordinates of a user's address.
///
/// The upstream API serves coordinates as decimal strings, not numbers, and
/// they are display-only here, so no numeric parsing is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

/// Postal address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Company affiliation of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// Marketing catch-phrase; serialized in camelCase by the upstream API.
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    /// Business-speak slogan.
    pub bs: String,
}

/// A single directory entry.
///
/// `id` is unique and stable, assigned by the data source. `name` is the
/// primary sort and filter key; the remaining fields are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

impl User {
    /// Formats the address as a single display line.
    ///
    /// # Examples
    ///
    /// ```
    /// use userdeck::domain::{Address, Company, Geo, User};
    ///
    /// let user = User {
    ///     id: 1,
    ///     name: "Leanne Graham".into(),
    ///     username: "Bret".into(),
    ///     email: "Sincere@april.biz".into(),
    ///     address: Address {
    ///         street: "Kulas Light".into(),
    ///         suite: "Apt. 556".into(),
    ///         city: "Gwenborough".into(),
    ///         zipcode: "92998-3874".into(),
    ///         geo: Geo { lat: "-37.3159".into(), lng: "81.1496".into() },
    ///     },
    ///     phone: "1-770-736-8031".into(),
    ///     website: "hildegard.org".into(),
    ///     company: Company {
    ///         name: "Romaguera-Crona".into(),
    ///         catch_phrase: "Multi-layered client-server neural-net".into(),
    ///         bs: "harness real-time e-markets".into(),
    ///     },
    /// };
    ///
    /// assert_eq!(
    ///     user.full_address(),
    ///     "Kulas Light, Apt. 556, Gwenborough, 92998-3874"
    /// );
    /// ```
    #[must_use]
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.address.street, self.address.suite, self.address.city, self.address.zipcode
        )
    }
}

#[cfg(test)]
impl User {
    /// Builds a minimal user for tests; only `id` and `name` matter to the
    /// filter/sort engine, the rest is boilerplate display data.
    pub(crate) fn fixture(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            address: Address {
                street: "1 Main St".into(),
                suite: "Apt. 1".into(),
                city: "Springfield".into(),
                zipcode: "00000".into(),
                geo: Geo {
                    lat: "0.0".into(),
                    lng: "0.0".into(),
                },
            },
            phone: "555-0100".into(),
            website: "example.com".into(),
            company: Company {
                name: "Acme".into(),
                catch_phrase: "Synergize scalable paradigms".into(),
                bs: "empower niche markets".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> &'static str {
        r#"{
            "id": 3,
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net",
            "address": {
                "street": "Douglas Extension",
                "suite": "Suite 847",
                "city": "McKenziehaven",
                "zipcode": "59590-4157",
                "geo": { "lat": "-68.6102", "lng": "-47.0653" }
            },
            "phone": "1-463-123-4447",
            "website": "ramiro.info",
            "company": {
                "name": "Romaguera-Jacobson",
                "catchPhrase": "Face to face bifurcated interface",
                "bs": "e-enable strategic applications"
            }
        }"#
    }

    #[test]
    fn decodes_upstream_payload_shape() {
        let user: User = serde_json::from_str(sample_payload()).expect("valid payload");

        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Clementine Bauch");
        assert_eq!(user.username, "Samantha");
        assert_eq!(user.address.geo.lng, "-47.0653");
        assert_eq!(user.company.catch_phrase, "Face to face bifurcated interface");
    }

    #[test]
    fn full_address_joins_all_components() {
        let user: User = serde_json::from_str(sample_payload()).expect("valid payload");

        assert_eq!(
            user.full_address(),
            "Douglas Extension, Suite 847, McKenziehaven, 59590-4157"
        );
    }

    #[test]
    fn round_trips_camel_case_catch_phrase() {
        let user: User = serde_json::from_str(sample_payload()).expect("valid payload");
        let encoded = serde_json::to_string(&user).expect("serializable");

        assert!(encoded.contains("\"catchPhrase\""));
        assert!(!encoded.contains("catch_phrase"));
    }
}
