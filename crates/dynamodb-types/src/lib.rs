//! DynamoDB attribute-value decoding for techrecord-sync.
//!
//! This crate understands exactly one wire contract: a document is a JSON
//! object mapping field names to single-key tagged values, where the tag is
//! one of `NULL`, `BOOL`, `S`, `SS`, `N`, `NS`, `B`, `BS`, `M`, `L`. It has
//! no knowledge of business entities; the entity parsers in the root crate
//! build on the accessors provided here.
//!
//! # Structure
//!
//! - `image`: the [`DynamoDbImage`] accessor object and the recursive
//!   [`AttributeValue`] sum type it decodes into
//!
//! # Example
//!
//! ```rust
//! use dynamodb_types::DynamoDbImage;
//!
//! let raw = serde_json::json!({
//!     "systemNumber": {"S": "SYSTEM-NUMBER"},
//!     "noOfAxles": {"N": "2"},
//! });
//!
//! let image = DynamoDbImage::from_json(&raw).unwrap();
//! assert_eq!(image.get_string("systemNumber").unwrap(), "SYSTEM-NUMBER");
//! assert_eq!(image.get_number("noOfAxles").unwrap(), 2.0);
//! ```

pub mod image;

pub use image::{AttributeType, AttributeValue, DocumentError, DynamoDbImage};
