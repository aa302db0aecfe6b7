//! ATTRDIFF - Attribute-level diff engine.
//!
//! This library compares two instances of the same type attribute by
//! attribute and reports what changed, for auditing before/after states of
//! records without hand-written comparison code. It provides null-safe
//! comparators for scalars, arrays, collections and maps, attribute discovery
//! through explicit descriptors or `serde`, and include/exclude filtering.
//!
//! # Example
//!
//! ```
//! use attrdiff::{DiffComparatorFactory, DiffEntry, Diffable, TypeDescriptor, ValueKind};
//!
//! struct Delivery {
//!     id: i64,
//!     status: String,
//!     notes: Option<String>,
//! }
//!
//! impl Diffable for Delivery {
//!     fn descriptor() -> TypeDescriptor<Self> {
//!         TypeDescriptor::new("Delivery")
//!             .attribute("id", ValueKind::Long, |d: &Delivery| d.id)
//!             .attribute("status", ValueKind::String, |d: &Delivery| d.status.clone())
//!             .attribute("notes", ValueKind::String, |d: &Delivery| d.notes.clone())
//!     }
//! }
//!
//! # fn example() -> Result<(), attrdiff::DiffError> {
//! let comparator = DiffComparatorFactory::create_excluding::<Delivery, _, _>(["notes"]);
//!
//! let before = Delivery { id: 1, status: "PENDING".into(), notes: None };
//! let after = Delivery { id: 1, status: "DELIVERED".into(), notes: Some("left at door".into()) };
//!
//! let entries = comparator.diff_compare(&before, &after)?;
//! assert_eq!(entries, vec![DiffEntry::new("status", "PENDING", "DELIVERED")]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod comparator;
pub mod config;
pub mod diff;
pub mod entry;
pub mod error;
pub mod factory;
pub mod filter;
pub mod resolver;
pub mod validator;
pub mod value;

// Re-export commonly used types for convenience
pub use comparator::{Comparator, NullSafe};
pub use config::{load_settings, parse_settings, DiffSettings, FormatHint};
pub use diff::DiffComparator;
pub use entry::DiffEntry;
pub use error::{AttributeError, CompareError, CompareResult, DiffError, ParseError};
pub use factory::DiffComparatorFactory;
pub use filter::PropertyFilter;
pub use resolver::{AttributeInfo, AttributeResolver, Diffable, SerdeResolver, TypeDescriptor};
pub use value::{Locale, Record, Value, ValueKind};
