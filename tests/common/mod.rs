#![allow(dead_code)]

use attrdiff::{Diffable, Record, TypeDescriptor, Value, ValueKind};
use chrono::{DateTime, Duration, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Delivered,
    Rejected,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "PENDING",
            DeliveryStatus::Delivered => "DELIVERED",
            DeliveryStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BaseEntity {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Diffable for BaseEntity {
    fn descriptor() -> TypeDescriptor<Self> {
        TypeDescriptor::new("BaseEntity")
            .attribute("id", ValueKind::Long, |e: &BaseEntity| e.id)
            .attribute("createdAt", ValueKind::Timestamp, |e: &BaseEntity| e.created_at)
            .attribute("updatedAt", ValueKind::Timestamp, |e: &BaseEntity| e.updated_at)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressInfo {
    pub id: i64,
    pub city: String,
    pub country: String,
    pub street: Option<String>,
}

impl AddressInfo {
    pub fn new(id: i64, city: &str, country: &str) -> Self {
        Self {
            id,
            city: city.to_string(),
            country: country.to_string(),
            street: None,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Record(
            Record::new("AddressInfo")
                .field("id", self.id)
                .field("city", self.city.as_str())
                .field("country", self.country.as_str())
                .field("street", self.street.clone()),
        )
    }
}

impl Diffable for AddressInfo {
    fn descriptor() -> TypeDescriptor<Self> {
        TypeDescriptor::new("AddressInfo")
            .attribute("id", ValueKind::Long, |a: &AddressInfo| a.id)
            .attribute("city", ValueKind::String, |a: &AddressInfo| a.city.clone())
            .attribute("country", ValueKind::String, |a: &AddressInfo| a.country.clone())
            .attribute("street", ValueKind::String, |a: &AddressInfo| a.street.clone())
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryInfo {
    pub base: BaseEntity,
    pub kind: i32,
    pub gid: String,
    pub description: Option<String>,
    pub balance: f64,
    pub status: DeliveryStatus,
    pub addresses: Vec<AddressInfo>,
    pub parent: Option<Box<DeliveryInfo>>,
}

impl Diffable for DeliveryInfo {
    fn descriptor() -> TypeDescriptor<Self> {
        TypeDescriptor::new("DeliveryInfo")
            .inherit(BaseEntity::descriptor(), |d: &DeliveryInfo| &d.base)
            .attribute("type", ValueKind::Int, |d: &DeliveryInfo| d.kind)
            .attribute("gid", ValueKind::String, |d: &DeliveryInfo| d.gid.clone())
            .attribute("description", ValueKind::String, |d: &DeliveryInfo| {
                d.description.clone()
            })
            .attribute("balance", ValueKind::Double, |d: &DeliveryInfo| d.balance)
            .attribute("status", ValueKind::String, |d: &DeliveryInfo| d.status.as_str())
            .attribute("addresses", ValueKind::List, |d: &DeliveryInfo| {
                d.addresses.iter().map(AddressInfo::to_value).collect::<Vec<Value>>()
            })
            .attribute("parent", ValueKind::record("DeliveryInfo"), |d: &DeliveryInfo| {
                d.parent.as_ref().map(|p| p.base.id)
            })
    }
}

/// Attribute names of `DeliveryInfo` in discovery order.
pub const DELIVERY_ATTRIBUTES: [&str; 9] = [
    "id",
    "createdAt",
    "updatedAt",
    "type",
    "gid",
    "description",
    "balance",
    "status",
    "addresses",
];

pub fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn delivery() -> DeliveryInfo {
    DeliveryInfo {
        base: BaseEntity {
            id: 1,
            created_at: timestamp(1_600_000_000),
            updated_at: None,
        },
        kind: 5,
        gid: "GID-ab12".to_string(),
        description: Some("fragile".to_string()),
        balance: 1.0000547,
        status: DeliveryStatus::Delivered,
        addresses: vec![
            AddressInfo::new(1, "Paris", "France"),
            AddressInfo::new(2, "Lyon", "France"),
        ],
        parent: None,
    }
}

/// A delivery that differs from [`delivery`] in every attribute.
pub fn other_delivery() -> DeliveryInfo {
    DeliveryInfo {
        base: BaseEntity {
            id: 2,
            created_at: timestamp(1_600_000_000) + Duration::hours(3),
            updated_at: Some(timestamp(1_700_000_000)),
        },
        kind: 7,
        gid: "gid-AB12-other".to_string(),
        description: Some("handle with care".to_string()),
        balance: 2.5,
        status: DeliveryStatus::Pending,
        addresses: vec![AddressInfo::new(3, "Berlin", "Germany")],
        parent: Some(Box::new(delivery())),
    }
}

pub fn names(entries: &[attrdiff::DiffEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.property_name()).collect()
}
