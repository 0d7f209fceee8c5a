use crate::model::cafe::Cafe;
use serde::{Deserialize, Serialize};

/// Body of `GET /all`: every stored cafe under a `cafes` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CafeList {
    pub cafes: Vec<Cafe>,
}
