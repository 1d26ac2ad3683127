use std::collections::BTreeMap;

use crate::core::models::change_event::{ChangeEvent, ChangeKind, FieldChange};
use crate::core::models::order_record::{Address, OrderRecord};
use crate::core::models::value::Value;
use crate::core::services::differ::differs;

/// Scalar fields compared on every cycle, in emission order.
const SCALAR_RULES: [(&str, ChangeKind); 6] = [
    ("status", ChangeKind::StatusChanged),
    ("currency", ChangeKind::CurrencyChanged),
    ("total", ChangeKind::TotalChanged),
    ("tax_total", ChangeKind::TaxChanged),
    ("shipping_total", ChangeKind::ShippingCostChanged),
    ("payment_method", ChangeKind::PaymentMethodChanged),
];

fn scalar_field<'a>(record: &'a OrderRecord, name: &str) -> &'a Value {
    match name {
        "status" => &record.status,
        "currency" => &record.currency,
        "total" => &record.total,
        "tax_total" => &record.tax_total,
        "shipping_total" => &record.shipping_total,
        "payment_method" => &record.payment_method,
        _ => &Value::Null,
    }
}

/// Turns the differences between two order snapshots into change events.
///
/// Events come out in a fixed order: the scalar rule table, billing
/// address, shipping address, items, shipping methods, coupons, then
/// tracked custom meta fields.
#[derive(Debug, Clone, Default)]
pub struct ChangeClassifier {
    tracked_meta: Vec<String>,
}

impl ChangeClassifier {
    /// Classifier that also compares the given custom meta keys, in order.
    pub fn new(tracked_meta: Vec<String>) -> Self {
        Self { tracked_meta }
    }

    /// Compare two snapshots of the same order.
    ///
    /// Returns no events if either snapshot is missing.
    pub fn classify(
        &self,
        record_id: &str,
        old: Option<&OrderRecord>,
        new: Option<&OrderRecord>,
    ) -> Vec<ChangeEvent> {
        let (Some(old), Some(new)) = (old, new) else {
            return Vec::new();
        };

        let event = |kind: ChangeKind, field: &str, old_value: Value, new_value: Value| ChangeEvent {
            record_id: record_id.to_string(),
            kind,
            field_name: Some(field.to_string()),
            old_value,
            new_value,
            payload: None,
        };

        let mut events = Vec::new();

        for (field, kind) in SCALAR_RULES {
            let (old_value, new_value) = (scalar_field(old, field), scalar_field(new, field));
            if differs(old_value, new_value) {
                events.push(event(kind, field, old_value.clone(), new_value.clone()));
            }
        }

        let addresses = [
            (
                "billing_address",
                ChangeKind::BillingAddressChanged,
                &old.billing_address,
                &new.billing_address,
                true,
            ),
            (
                "shipping_address",
                ChangeKind::ShippingAddressChanged,
                &old.shipping_address,
                &new.shipping_address,
                false,
            ),
        ];
        for (field, kind, old_address, new_address, primary) in addresses {
            let changes = compare_addresses(old_address, new_address, primary);
            if !changes.is_empty() {
                events.push(ChangeEvent {
                    payload: Some(changes),
                    ..event(kind, field, old_address.to_value(), new_address.to_value())
                });
            }
        }

        let (old_items, new_items) = (old.items_value(), new.items_value());
        if differs(&old_items, &new_items) {
            events.push(event(
                ChangeKind::ProductQuantityChanged,
                "items",
                old_items,
                new_items,
            ));
        }

        let (old_shipping, new_shipping) = (old.shipping_methods_value(), new.shipping_methods_value());
        if differs(&old_shipping, &new_shipping) {
            events.push(event(
                ChangeKind::ShippingMethodChanged,
                "shipping_methods",
                old_shipping,
                new_shipping,
            ));
        }

        let (old_codes, new_codes) = (old.coupon_codes(), new.coupon_codes());
        for code in new_codes.iter().filter(|c| !old_codes.contains(c)) {
            events.push(event(
                ChangeKind::CouponAdded,
                "coupon",
                Value::Null,
                Value::from(code.as_str()),
            ));
        }
        for code in old_codes.iter().filter(|c| !new_codes.contains(c)) {
            events.push(event(
                ChangeKind::CouponRemoved,
                "coupon",
                Value::from(code.as_str()),
                Value::Null,
            ));
        }

        for key in &self.tracked_meta {
            let old_value = old.custom_meta.get(key).unwrap_or(&Value::Null);
            let new_value = new.custom_meta.get(key).unwrap_or(&Value::Null);
            if differs(old_value, new_value) {
                events.push(event(
                    ChangeKind::CustomFieldChanged,
                    key,
                    old_value.clone(),
                    new_value.clone(),
                ));
            }
        }

        events
    }
}

/// Differing sub-fields of two addresses, keyed by sub-field name.
///
/// Contact sub-fields (email, phone) only count on the primary address.
pub fn compare_addresses(
    old: &Address,
    new: &Address,
    primary: bool,
) -> BTreeMap<String, FieldChange> {
    let contact: &[&str] = if primary {
        &Address::CONTACT_FIELDS
    } else {
        &[]
    };

    Address::FIELDS
        .iter()
        .chain(contact.iter())
        .filter(|name| differs(old.field(name), new.field(name)))
        .map(|name| {
            (
                name.to_string(),
                FieldChange {
                    old: old.field(name).clone(),
                    new: new.field(name).clone(),
                },
            )
        })
        .collect()
}
