mod common;

use attrdiff::resolver::{AttributeInfo, AttributeResolver, SerdeResolver, TypeDescriptor};
use attrdiff::{AttributeError, DiffComparator, DiffEntry, Diffable, Value, ValueKind};
use common::*;
use bigdecimal::BigDecimal;
use serde::Serialize;

#[test]
fn test_inherited_attributes_come_first() {
    let descriptor = DeliveryInfo::descriptor();
    let names: Vec<String> = descriptor.attributes().into_iter().map(|a| a.name).collect();
    assert_eq!(names, DELIVERY_ATTRIBUTES);
}

#[test]
fn test_inherited_attribute_reads_through_projection() {
    let descriptor = DeliveryInfo::descriptor();
    assert_eq!(descriptor.read(&delivery(), "id").unwrap(), Value::Long(1));
    assert_eq!(
        descriptor.read(&delivery(), "createdAt").unwrap(),
        Value::Timestamp(timestamp(1_600_000_000))
    );
    assert_eq!(descriptor.read(&delivery(), "updatedAt").unwrap(), Value::Null);
}

#[test]
fn test_own_attribute_shadows_inherited_one() {
    let descriptor = TypeDescriptor::<DeliveryInfo>::new("DeliveryInfo")
        .attribute("id", ValueKind::String, |d: &DeliveryInfo| format!("D-{}", d.base.id))
        .inherit(BaseEntity::descriptor(), |d: &DeliveryInfo| &d.base);

    let attributes = descriptor.attributes();
    assert_eq!(attributes[0], AttributeInfo::new("id", ValueKind::String));
    assert_eq!(attributes.len(), 3);
    assert_eq!(descriptor.read(&delivery(), "id").unwrap(), Value::from("D-1"));
}

#[test]
fn test_self_referencing_attribute_is_not_discovered() {
    let descriptor = DeliveryInfo::descriptor();
    assert!(descriptor.get("parent").is_some());
    assert!(descriptor.attributes().iter().all(|a| a.name != "parent"));
}

#[test]
fn test_non_comparable_attribute_is_hidden() {
    let descriptor = DeliveryInfo::descriptor().non_comparable("gid").non_comparable("country");
    let names: Vec<String> = descriptor.attributes().into_iter().map(|a| a.name).collect();
    assert_eq!(names.len(), DELIVERY_ATTRIBUTES.len() - 1);
    assert!(!names.contains(&"gid".to_string()));

    let comparator = DiffComparator::with_resolver(descriptor);
    let mut last = delivery();
    last.gid = "changed".to_string();
    assert!(comparator.diff_compare(&delivery(), &last).unwrap().is_empty());
}

#[test]
fn test_unknown_attribute_read_fails() {
    let err = DeliveryInfo::descriptor()
        .read(&delivery(), "country")
        .unwrap_err();
    assert!(matches!(err, AttributeError::Unknown { ref name } if name == "country"));
    assert_eq!(err.to_string(), "Unknown attribute: country");
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct Invoice {
    invoice_id: i64,
    customer_name: String,
    total: f64,
    paid: bool,
    lines: Vec<String>,
    #[serde(skip_serializing)]
    #[allow(dead_code)]
    audit_token: String,
}

fn invoice() -> Invoice {
    Invoice {
        invoice_id: 10,
        customer_name: "ACME".to_string(),
        total: 99.5,
        paid: false,
        lines: vec!["bolts".to_string()],
        audit_token: "t-1".to_string(),
    }
}

#[test]
fn test_serde_resolver_discovers_renamed_fields() {
    let resolver = SerdeResolver::from_prototype(&invoice()).unwrap();
    assert_eq!(resolver.type_name(), "Invoice");
    assert_eq!(
        resolver.attributes(),
        vec![
            AttributeInfo::new("invoiceId", ValueKind::Any),
            AttributeInfo::new("customerName", ValueKind::String),
            AttributeInfo::new("total", ValueKind::Double),
            AttributeInfo::new("paid", ValueKind::Bool),
            AttributeInfo::new("lines", ValueKind::List),
        ]
    );
}

#[test]
fn test_serde_resolver_drives_diff() {
    let resolver = SerdeResolver::from_prototype(&invoice())
        .unwrap()
        .with_type_name("billing.Invoice");
    let mut comparator = DiffComparator::with_resolver(resolver);
    comparator.exclude_properties(["lines"]);
    assert_eq!(comparator.type_name(), "billing.Invoice");

    let first = invoice();
    let mut last = invoice();
    last.paid = true;
    last.total = 100.0;
    last.lines.push("nuts".to_string());
    last.audit_token = "t-2".to_string();

    let entries = comparator.diff_compare(&first, &last).unwrap();
    assert_eq!(
        entries,
        vec![
            DiffEntry::new("total", 99.5, 100.0),
            DiffEntry::new("paid", false, true),
        ]
    );
}

fn serde_comparator<T: Serialize + 'static>(prototype: &T) -> DiffComparator<T> {
    DiffComparator::with_resolver(SerdeResolver::from_prototype(prototype).unwrap())
}

#[test]
fn test_serde_diff_reports_in_field_order() {
    let comparator = serde_comparator(&invoice());

    let first = invoice();
    let last = Invoice {
        invoice_id: 11,
        customer_name: "Globex".to_string(),
        total: 12.0,
        paid: true,
        lines: Vec::new(),
        audit_token: "t-9".to_string(),
    };

    let entries = comparator.diff_compare(&first, &last).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.property_name()).collect();
    assert_eq!(names, vec!["invoiceId", "customerName", "total", "paid", "lines"]);
    assert_eq!(entries[0], DiffEntry::new("invoiceId", 10_i64, 11_i64));

    let reversed = comparator.diff_compare(&last, &first).unwrap();
    let names: Vec<&str> = reversed.iter().map(|e| e.property_name()).collect();
    assert_eq!(names, vec!["invoiceId", "customerName", "total", "paid", "lines"]);
}

#[test]
fn test_serde_diff_of_equal_copy_is_empty() {
    let comparator = serde_comparator(&invoice());
    let first = invoice();
    let mut copy = first.clone();
    copy.audit_token = "ignored".to_string();

    assert!(comparator.diff_compare(&first, &copy).unwrap().is_empty());
    assert!(comparator.diff_compare(&first, &first).unwrap().is_empty());
}

#[test]
fn test_serde_diff_honours_include_and_exclude() {
    let mut comparator = serde_comparator(&invoice());
    comparator
        .include_properties(["paid", "invoiceId", "auditToken", "total"])
        .exclude_properties(["total"]);
    assert_eq!(comparator.active_properties(), ["invoiceId", "paid"]);

    let mut last = invoice();
    last.total = 0.0;
    last.customer_name = "Initech".to_string();
    assert!(comparator.diff_compare(&invoice(), &last).unwrap().is_empty());

    last.paid = true;
    assert_eq!(
        comparator.diff_compare(&invoice(), &last).unwrap(),
        vec![DiffEntry::new("paid", false, true)]
    );
}

#[derive(Serialize, Default)]
struct Meter {
    serial: String,
    reading: u64,
}

#[test]
fn test_serde_diff_of_wide_unsigned_field() {
    let comparator = serde_comparator(&Meter::default());
    let first = Meter {
        serial: "M-7".to_string(),
        reading: u64::MAX,
    };
    let last = Meter {
        serial: "M-7".to_string(),
        reading: 42,
    };

    assert_eq!(
        comparator.diff_compare(&first, &last).unwrap(),
        vec![DiffEntry::new("reading", BigDecimal::from(u64::MAX), 42_i64)]
    );
    let same = Meter {
        serial: "M-7".to_string(),
        reading: u64::MAX,
    };
    assert!(comparator.diff_compare(&first, &same).unwrap().is_empty());
}
