use serde::{Deserialize, Serialize};

/// Maximum length of the `name` column.
pub const NAME_MAX_LEN: usize = 250;
/// Maximum length of the `map_url` and `img_url` columns.
pub const URL_MAX_LEN: usize = 500;
/// Maximum length of the remaining free-text columns (`location`, `seats`, `coffee_price`).
pub const TEXT_MAX_LEN: usize = 250;

/// A cafe listing as stored in the `cafe` table.
///
/// The field order mirrors the JSON objects served by `GET /all`, so the
/// serialized form of this struct is the public wire format of a cafe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cafe {
    /// Identity assigned by the store on insertion.
    pub id: i64,
    /// Unique across all cafes (exact, case-sensitive match).
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    /// Free text, e.g. "20-30".
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    /// Free text, e.g. "£2.50".
    pub coffee_price: String,
}

/// A validated candidate record: every field of a `Cafe` except its identity.
///
/// Only `validation::validate_submission` produces these from user input, so a
/// `NewCafe` reaching the repository is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: String,
}

impl NewCafe {
    /// Attaches the identity assigned by the store.
    pub fn with_id(self, id: i64) -> Cafe {
        Cafe {
            id,
            name: self.name,
            map_url: self.map_url,
            img_url: self.img_url,
            location: self.location,
            seats: self.seats,
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            has_sockets: self.has_sockets,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price,
        }
    }
}
