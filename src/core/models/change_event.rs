use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::OrderTrailError;
use crate::core::models::value::Value;

/// Kinds of change recorded against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    OrderCreated,
    StatusChanged,
    CurrencyChanged,
    TotalChanged,
    TaxChanged,
    ShippingCostChanged,
    PaymentMethodChanged,
    BillingAddressChanged,
    ShippingAddressChanged,
    EmailChanged,
    PhoneChanged,
    ProductAdded,
    ProductRemoved,
    ProductQuantityChanged,
    ProductPriceChanged,
    ShippingAdded,
    ShippingRemoved,
    ShippingMethodChanged,
    CouponAdded,
    CouponRemoved,
    FeeAdded,
    FeeRemoved,
    FeeChanged,
    NoteAdded,
    NoteDeleted,
    OrderRefunded,
    CustomFieldChanged,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 27] = [
        ChangeKind::OrderCreated,
        ChangeKind::StatusChanged,
        ChangeKind::CurrencyChanged,
        ChangeKind::TotalChanged,
        ChangeKind::TaxChanged,
        ChangeKind::ShippingCostChanged,
        ChangeKind::PaymentMethodChanged,
        ChangeKind::BillingAddressChanged,
        ChangeKind::ShippingAddressChanged,
        ChangeKind::EmailChanged,
        ChangeKind::PhoneChanged,
        ChangeKind::ProductAdded,
        ChangeKind::ProductRemoved,
        ChangeKind::ProductQuantityChanged,
        ChangeKind::ProductPriceChanged,
        ChangeKind::ShippingAdded,
        ChangeKind::ShippingRemoved,
        ChangeKind::ShippingMethodChanged,
        ChangeKind::CouponAdded,
        ChangeKind::CouponRemoved,
        ChangeKind::FeeAdded,
        ChangeKind::FeeRemoved,
        ChangeKind::FeeChanged,
        ChangeKind::NoteAdded,
        ChangeKind::NoteDeleted,
        ChangeKind::OrderRefunded,
        ChangeKind::CustomFieldChanged,
    ];

    /// Stable snake_case name, as stored in the change log.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::OrderCreated => "order_created",
            ChangeKind::StatusChanged => "status_changed",
            ChangeKind::CurrencyChanged => "currency_changed",
            ChangeKind::TotalChanged => "total_changed",
            ChangeKind::TaxChanged => "tax_changed",
            ChangeKind::ShippingCostChanged => "shipping_cost_changed",
            ChangeKind::PaymentMethodChanged => "payment_method_changed",
            ChangeKind::BillingAddressChanged => "billing_address_changed",
            ChangeKind::ShippingAddressChanged => "shipping_address_changed",
            ChangeKind::EmailChanged => "email_changed",
            ChangeKind::PhoneChanged => "phone_changed",
            ChangeKind::ProductAdded => "product_added",
            ChangeKind::ProductRemoved => "product_removed",
            ChangeKind::ProductQuantityChanged => "product_quantity_changed",
            ChangeKind::ProductPriceChanged => "product_price_changed",
            ChangeKind::ShippingAdded => "shipping_added",
            ChangeKind::ShippingRemoved => "shipping_removed",
            ChangeKind::ShippingMethodChanged => "shipping_method_changed",
            ChangeKind::CouponAdded => "coupon_added",
            ChangeKind::CouponRemoved => "coupon_removed",
            ChangeKind::FeeAdded => "fee_added",
            ChangeKind::FeeRemoved => "fee_removed",
            ChangeKind::FeeChanged => "fee_changed",
            ChangeKind::NoteAdded => "note_added",
            ChangeKind::NoteDeleted => "note_deleted",
            ChangeKind::OrderRefunded => "order_refunded",
            ChangeKind::CustomFieldChanged => "custom_field_changed",
        }
    }

    /// Human-readable label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::OrderCreated => "Order created",
            ChangeKind::StatusChanged => "Status changed",
            ChangeKind::CurrencyChanged => "Currency changed",
            ChangeKind::TotalChanged => "Total changed",
            ChangeKind::TaxChanged => "Tax changed",
            ChangeKind::ShippingCostChanged => "Shipping cost changed",
            ChangeKind::PaymentMethodChanged => "Payment method changed",
            ChangeKind::BillingAddressChanged => "Billing address changed",
            ChangeKind::ShippingAddressChanged => "Shipping address changed",
            ChangeKind::EmailChanged => "Email changed",
            ChangeKind::PhoneChanged => "Phone changed",
            ChangeKind::ProductAdded => "Product added",
            ChangeKind::ProductRemoved => "Product removed",
            ChangeKind::ProductQuantityChanged => "Items changed",
            ChangeKind::ProductPriceChanged => "Product price changed",
            ChangeKind::ShippingAdded => "Shipping added",
            ChangeKind::ShippingRemoved => "Shipping removed",
            ChangeKind::ShippingMethodChanged => "Shipping method changed",
            ChangeKind::CouponAdded => "Coupon added",
            ChangeKind::CouponRemoved => "Coupon removed",
            ChangeKind::FeeAdded => "Fee added",
            ChangeKind::FeeRemoved => "Fee removed",
            ChangeKind::FeeChanged => "Fee changed",
            ChangeKind::NoteAdded => "Note added",
            ChangeKind::NoteDeleted => "Note deleted",
            ChangeKind::OrderRefunded => "Order refunded",
            ChangeKind::CustomFieldChanged => "Custom field changed",
        }
    }

    /// Kinds whose values are monetary amounts.
    pub fn is_price(&self) -> bool {
        matches!(
            self,
            ChangeKind::TotalChanged
                | ChangeKind::TaxChanged
                | ChangeKind::ShippingCostChanged
                | ChangeKind::ProductPriceChanged
                | ChangeKind::FeeChanged
        )
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = OrderTrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| OrderTrailError::UnknownAction {
                name: s.to_string(),
                available: ChangeKind::ALL
                    .iter()
                    .map(ChangeKind::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Old and new value of one sub-field of a composite field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub old: Value,
    pub new: Value,
}

/// One classified difference between two snapshots of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub record_id: String,
    pub kind: ChangeKind,
    pub field_name: Option<String>,
    pub old_value: Value,
    pub new_value: Value,
    /// Differing sub-fields, for composite fields such as addresses.
    pub payload: Option<BTreeMap<String, FieldChange>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind_from_its_name() {
        for kind in ChangeKind::ALL {
            assert_eq!(kind.as_str().parse::<ChangeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn serde_name_matches_as_str() {
        for kind in ChangeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn unknown_kind_lists_available() {
        let err = "status_exploded".parse::<ChangeKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("status_exploded"));
        assert!(msg.contains("status_changed"));
    }

    #[test]
    fn price_kinds() {
        assert!(ChangeKind::TotalChanged.is_price());
        assert!(ChangeKind::FeeChanged.is_price());
        assert!(!ChangeKind::StatusChanged.is_price());
    }
}
