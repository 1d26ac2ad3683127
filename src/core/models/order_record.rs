use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::models::value::Value;

/// Comparable state of an order at one point in time.
///
/// This is the normalized projection handed over by the host platform:
/// flat scalar fields plus a few composites. Scalars stay loosely typed
/// (`"10.00"` and `10` are both valid totals) because the host decides
/// their representation. Every field defaults when absent, and a
/// composite of the wrong shape (`null`, a scalar, `[]`) reads as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderRecord {
    pub status: Value,
    pub currency: Value,
    pub total: Value,
    pub subtotal: Value,
    pub tax_total: Value,
    pub shipping_total: Value,
    pub discount_total: Value,
    pub customer_id: Value,
    pub payment_method: Value,
    pub payment_method_title: Value,
    pub customer_note: Value,
    #[serde(deserialize_with = "empty_on_malformed")]
    pub billing_address: Address,
    #[serde(deserialize_with = "empty_on_malformed")]
    pub shipping_address: Address,
    /// Line items keyed by line item id.
    #[serde(deserialize_with = "lenient_map")]
    pub items: BTreeMap<String, LineItem>,
    /// Shipping lines keyed by line item id.
    #[serde(deserialize_with = "lenient_map")]
    pub shipping_methods: BTreeMap<String, ShippingLine>,
    /// Applied coupons keyed by line item id.
    #[serde(deserialize_with = "lenient_map")]
    pub coupons: BTreeMap<String, CouponLine>,
    /// Tracked custom meta fields.
    #[serde(deserialize_with = "lenient_map")]
    pub custom_meta: BTreeMap<String, Value>,
}

impl OrderRecord {
    pub fn items_value(&self) -> Value {
        collection_value(&self.items, LineItem::to_value)
    }

    pub fn shipping_methods_value(&self) -> Value {
        collection_value(&self.shipping_methods, ShippingLine::to_value)
    }

    /// Coupon codes in sorted order, skipping coupons without a scalar code.
    pub fn coupon_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .coupons
            .values()
            .filter(|c| !c.code.is_container())
            .map(|c| c.code.to_string())
            .filter(|c| !c.is_empty())
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }
}

/// A struct-shaped composite; anything but an object reads as empty.
fn empty_on_malformed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Object(_) => serde_json::from_value(raw).unwrap_or_default(),
        _ => T::default(),
    })
}

/// A keyed collection. Lists are keyed by index, other shapes read as
/// empty, and a malformed entry reads as an empty entry.
fn lenient_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let entries: Vec<(String, serde_json::Value)> = match raw {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    };

    Ok(entries
        .into_iter()
        .map(|(key, raw)| (key, serde_json::from_value(raw).unwrap_or_default()))
        .collect())
}

fn collection_value<T>(lines: &BTreeMap<String, T>, to_value: fn(&T) -> Value) -> Value {
    Value::Map(
        lines
            .iter()
            .map(|(id, line)| (id.clone(), to_value(line)))
            .collect(),
    )
}

/// A postal address with optional contact details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub first_name: Value,
    pub last_name: Value,
    pub company: Value,
    pub address_1: Value,
    pub address_2: Value,
    pub city: Value,
    pub state: Value,
    pub postcode: Value,
    pub country: Value,
    pub email: Value,
    pub phone: Value,
}

impl Address {
    /// Sub-fields compared on every address, in comparison order.
    pub const FIELDS: [&'static str; 9] = [
        "first_name",
        "last_name",
        "company",
        "address_1",
        "address_2",
        "city",
        "state",
        "postcode",
        "country",
    ];

    /// Contact sub-fields, only compared on the primary (billing) address.
    pub const CONTACT_FIELDS: [&'static str; 2] = ["email", "phone"];

    /// Value of a sub-field by name. Unknown names read as `Null`.
    pub fn field(&self, name: &str) -> &Value {
        match name {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "company" => &self.company,
            "address_1" => &self.address_1,
            "address_2" => &self.address_2,
            "city" => &self.city,
            "state" => &self.state,
            "postcode" => &self.postcode,
            "country" => &self.country,
            "email" => &self.email,
            "phone" => &self.phone,
            _ => &Value::Null,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Map(
            Self::FIELDS
                .iter()
                .chain(Self::CONTACT_FIELDS.iter())
                .map(|name| (name.to_string(), self.field(name).clone()))
                .collect(),
        )
    }
}

/// A product line on the order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub name: Value,
    pub product_id: Value,
    pub variation_id: Value,
    pub quantity: Value,
    pub subtotal: Value,
    pub total: Value,
    pub tax: Value,
}

impl LineItem {
    pub fn to_value(&self) -> Value {
        Value::Map(BTreeMap::from([
            ("name".to_string(), self.name.clone()),
            ("product_id".to_string(), self.product_id.clone()),
            ("variation_id".to_string(), self.variation_id.clone()),
            ("quantity".to_string(), self.quantity.clone()),
            ("subtotal".to_string(), self.subtotal.clone()),
            ("total".to_string(), self.total.clone()),
            ("tax".to_string(), self.tax.clone()),
        ]))
    }
}

/// A shipping line on the order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingLine {
    pub name: Value,
    pub method_id: Value,
    pub total: Value,
    pub tax: Value,
}

impl ShippingLine {
    pub fn to_value(&self) -> Value {
        Value::Map(BTreeMap::from([
            ("name".to_string(), self.name.clone()),
            ("method_id".to_string(), self.method_id.clone()),
            ("total".to_string(), self.total.clone()),
            ("tax".to_string(), self.tax.clone()),
        ]))
    }
}

/// A coupon applied to the order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CouponLine {
    pub code: Value,
    pub discount: Value,
    pub discount_tax: Value,
}
