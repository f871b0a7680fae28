use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// `{ "id": ... }` payload returned by creates and deletes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdBody<T> {
    pub id: T,
}
