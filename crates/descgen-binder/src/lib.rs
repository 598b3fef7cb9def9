//! Symbol resolution for enum declarations.
//!
//! The binder turns an [`EnumSite`](descgen_parser::EnumSite) into a
//! [`ResolvedEnumType`]: the containing namespace, the chain of containing
//! types with their declared accessibility, and each member's attributes
//! with resolved class names and evaluated constant arguments.

pub mod accessibility;
pub use accessibility::Accessibility;

pub mod constants;
pub use constants::{ConstantValue, evaluate_constant};

pub mod symbols;
pub use symbols::{ContainingType, ResolvedAttribute, ResolvedEnumType, ResolvedMember};

pub mod binder;
pub use binder::{BindError, Binder, resolve_attribute_class_name};

#[cfg(test)]
#[path = "tests/binder_tests.rs"]
mod binder_tests;

#[cfg(test)]
#[path = "tests/constants_tests.rs"]
mod constants_tests;
