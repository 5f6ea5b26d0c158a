//! Liquor store catalogue
//!
//! The `LIST` reply carries a JSON array:
//!
//! ```text
//! [ [uuid, commercial_name, origin, stock, price], ..., connected_users, owner_uuid ]
//! ```
//!
//! Every element but the last two is a liquor row.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// One product offered by the store
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LiquorRow")]
pub struct Liquor {
    pub uuid: String,
    pub commercial_name: String,
    /// Country of origin
    pub origin: String,
    pub stock: u64,
    pub price: f64,
}

/// Positional form used on the wire
#[derive(Deserialize)]
struct LiquorRow(String, String, String, u64, f64);

impl From<LiquorRow> for Liquor {
    fn from(row: LiquorRow) -> Self {
        let LiquorRow(uuid, commercial_name, origin, stock, price) = row;
        Self {
            uuid,
            commercial_name,
            origin,
            stock,
            price,
        }
    }
}

/// Decoded `LIST` payload
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    pub liquors: Vec<Liquor>,
    pub connected_users: u64,
    pub owner_uuid: String,
}

impl Catalogue {
    /// Parse the JSON body of a `LIST` reply
    pub fn parse(json: &str) -> Result<Self> {
        let mut elements: Vec<Value> = serde_json::from_str(json)?;

        if elements.len() < 2 {
            return Err(ClientError::Catalogue(format!(
                "expected at least 2 elements, got {}",
                elements.len()
            )));
        }

        let owner = elements.pop().unwrap_or(Value::Null);
        let users = elements.pop().unwrap_or(Value::Null);

        let owner_uuid = owner
            .as_str()
            .ok_or_else(|| ClientError::Catalogue(format!("owner UUID is not a string: {}", owner)))?
            .to_string();
        let connected_users = users
            .as_u64()
            .ok_or_else(|| ClientError::Catalogue(format!("user count is not a number: {}", users)))?;

        let liquors = elements
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Liquor>, _>>()?;

        Ok(Self {
            liquors,
            connected_users,
            owner_uuid,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.liquors.is_empty()
    }

    /// Look up a liquor by UUID
    pub fn get(&self, uuid: &str) -> Option<&Liquor> {
        self.liquors.iter().find(|l| l.uuid == uuid)
    }
}
