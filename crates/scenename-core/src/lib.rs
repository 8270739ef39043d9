//! # scenename-core
//!
//! Shared vocabulary of the scene name codec:
//!
//! - **Property keys** ([`PropertyKey`]) naming the fields of each entity
//!   shape, and the decoded [`PropertyMap`].
//! - **Entity model** ([`model`]): series, seasons, episodes, movies,
//!   releases and subtitle releases as plain records.
//! - **Value conversion** ([`ConverterService`]) between typed property
//!   values and their textual form.
//! - **Errors** ([`Error`]) distinguishing no-match, mapping, conversion and
//!   configuration failures.
//!
//! # Examples
//!
//! ```
//! use scenename_core::convert::{ConverterService, NumberConverter, Value};
//! use scenename_core::property::season;
//!
//! let converters = ConverterService::builder()
//!     .property(season::NUMBER, NumberConverter::new("S", 2))
//!     .build();
//!
//! assert_eq!(converters.to_text(season::NUMBER, &Value::Number(8)).unwrap(), "S08");
//! assert_eq!(converters.parse_number(season::NUMBER, "S08").unwrap(), 8);
//! ```

pub mod convert;
pub mod error;
pub mod model;
pub mod property;

pub use convert::{Converter, ConverterService, Value, ValueKind};
pub use error::{ConfigError, ConversionError, Error, MappingError, Result};
pub use model::*;
pub use property::{PropertyKey, PropertyMap};
