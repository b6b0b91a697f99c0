//! Structural checks of trees against declarative shapes.
//!
//! A [`Shape`] maps field paths to the type tags they accept, written as a
//! `|`-separated list (`"string|integer"`). A [`ShapeDefinition`] is either
//! one shape that must hold entirely, or a list of alternative shapes of
//! which at least one must hold.
//!
//! Type tags are the runtime classifications `string`, `integer`, `double`
//! (or `float`), `boolean`, `array`, `object` and `null`, plus any type or
//! supertype name of a record. Integers are also accepted where `double` is;
//! the reverse does not hold.
//!
//! Checks never fail with an error; every outcome is a [`ValidationResult`].
//!
//! # Example
//!
//! ```
//! use treequill::document::parser::parse_yaml;
//! use treequill::shape::{check_full_requirements, shape, ShapeDefinition};
//!
//! let data = parse_yaml("b: 3").unwrap();
//! let definition = ShapeDefinition::AnyOf(vec![
//!     shape([("a", "string")]),
//!     shape([("b", "integer")]),
//! ]);
//!
//! let outcome = check_full_requirements(&definition, &data);
//! assert!(outcome.result);
//! ```

pub mod definition;
pub mod types;
pub mod validator;

pub use definition::{shape, Shape, ShapeDefinition, ValidationResult};
pub use types::{associated_types, is_from_type, TypeTag};
pub use validator::{check_full_requirements, check_requirements};
