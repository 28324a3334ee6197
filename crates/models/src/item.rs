use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const MISSING_FIELDS: &str = "Missing required fields: name, price, size";
pub const INVALID_SIZE: &str = "Size must be S, M, or L";
pub const INVALID_PRICE: &str = "Price must be a number";
pub const EMPTY_NAME: &str = "Name must not be empty";

/// Item size. Accepted case-insensitively, always stored uppercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Size {
    S,
    M,
    L,
}

impl FromStr for Size {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Size::S),
            "M" => Ok(Size::M),
            "L" => Ok(Size::L),
            _ => Err(ModelError::validation(INVALID_SIZE)),
        }
    }
}

impl TryFrom<String> for Size {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
        };
        f.write_str(s)
    }
}

/// A persisted item record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub size: Size,
}

impl Item {
    pub fn new(id: String, input: NewItem) -> Self {
        Self { id, name: input.name, price: input.price, size: input.size }
    }

    /// Numeric value of the id, read from its leading digits (`"12abc"` is 12).
    /// Ids without leading digits, or whose digits overflow `u64`, count as 0.
    pub fn numeric_id(&self) -> u64 {
        let id = self.id.trim_start();
        let end = id.find(|c: char| !c.is_ascii_digit()).unwrap_or(id.len());
        id[..end].parse().unwrap_or(0)
    }

    /// Overwrite the fields present in `changes`. The id never changes.
    pub fn apply(&mut self, changes: ItemChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(size) = changes.size {
            self.size = size;
        }
    }
}

/// Price as sent by clients: a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    pub fn to_price(&self) -> Result<f64, ModelError> {
        let value = match self {
            PriceInput::Number(n) => *n,
            PriceInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ModelError::validation(INVALID_PRICE))?,
        };
        if !value.is_finite() {
            return Err(ModelError::validation(INVALID_PRICE));
        }
        Ok(value)
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self { PriceInput::Number(value) }
}

/// Raw request body for create and update. Every field is optional here;
/// which ones are required depends on the operation. Unknown fields
/// (including `id`) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<PriceInput>,
    #[serde(default)]
    pub size: Option<String>,
}

/// Fully validated fields for a new item.
#[derive(Clone, Debug, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub size: Size,
}

/// Validated partial update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub size: Option<Size>,
}

impl ItemPayload {
    /// Check a create request: all three fields present, size in {S, M, L},
    /// price numeric.
    pub fn into_new_item(self) -> Result<NewItem, ModelError> {
        let (Some(name), Some(price), Some(size)) = (self.name, self.price, self.size) else {
            return Err(ModelError::validation(MISSING_FIELDS));
        };
        if name.trim().is_empty() || size.trim().is_empty() {
            return Err(ModelError::validation(MISSING_FIELDS));
        }
        let size = size.parse::<Size>()?;
        let price = price.to_price()?;
        Ok(NewItem { name, price, size })
    }

    /// Check an update request. Every present field is validated before the
    /// caller applies anything.
    pub fn into_changes(self) -> Result<ItemChanges, ModelError> {
        let size = self.size.as_deref().map(str::parse::<Size>).transpose()?;
        let price = self.price.as_ref().map(PriceInput::to_price).transpose()?;
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ModelError::validation(EMPTY_NAME));
            }
        }
        Ok(ItemChanges { name: self.name, price, size })
    }
}
