use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Domain Models
// ============================================================================
//
// Value types shared across the storefront: products with per-variant,
// per-size stock, orders with resolved line items, and user profiles.
// Wire field names are camelCase to stay compatible with the storefront
// frontend.
//
// ============================================================================

/// One of the two purchasable renditions of a jersey.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Home,
    Away,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Home => write!(f, "home"),
            Variant::Away => write!(f, "away"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    S,
    M,
    L,
    XL,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::S => write!(f, "S"),
            Size::M => write!(f, "M"),
            Size::L => write!(f, "L"),
            Size::XL => write!(f, "XL"),
        }
    }
}

/// Per-product mapping from (variant, size) to available quantity.
///
/// Counts are unsigned, so the non-negativity invariant holds by
/// construction; callers must check `available` before `set`ting a
/// decremented count.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Stock(BTreeMap<Variant, BTreeMap<Size, u32>>);

impl Stock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Available quantity for a variant/size, zero if the slot is absent.
    pub fn available(&self, variant: Variant, size: Size) -> u32 {
        self.0
            .get(&variant)
            .and_then(|sizes| sizes.get(&size))
            .copied()
            .unwrap_or(0)
    }

    pub fn set(&mut self, variant: Variant, size: Size, quantity: u32) {
        self.0.entry(variant).or_default().insert(size, quantity);
    }
}

/// Order lifecycle status. Orders are created as `Pending`; later
/// transitions are performed only by administrators.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

/// One line item as submitted by the customer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub variant_type: Variant,
    pub size: Size,
    pub quantity: u32,
    pub price: f64,
}

/// A line item frozen at purchase time: the submitted item plus the
/// product's display name as it was when the order committed. Later
/// product edits or deletions do not drift into past orders.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOrderItem {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    #[serde(rename = "type")]
    pub variant_type: Variant,
    pub images: Vec<String>,
    pub sku: String,
}

/// Product document. The document id lives outside the payload; see
/// [`Stored`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub club: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    pub variants: Vec<ProductVariant>,
    pub sizes: Vec<Size>,
    pub stock: Stock,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order document. Total amount is server-derived; the creation timestamp
/// is server-assigned at commit time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub user_id: String,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub items: Vec<ResolvedOrderItem>,
    pub shipping_address: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Per-user profile document keyed by the identity provider's uid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A document together with its store id, flattened on the wire so
/// responses read `{ "id": ..., ...fields }`.
#[derive(Serialize, Clone, Debug)]
pub struct Stored<T> {
    pub id: String,
    #[serde(flatten)]
    pub doc: T,
}

// ============================================================================
// Unit Tests
// ============================================================================
