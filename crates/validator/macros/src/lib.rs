//! Procedural macros for tagcheck
//!
//! - **`#[derive(Record)]`** - field-descriptor table for tag-driven validation
//!
//! # Architecture
//!
//! Each derive macro is implemented in its own module:
//!
//! - `record/` - Record derive implementation

use proc_macro::TokenStream;

mod record;

// ============================================================================
// RECORD DERIVE
// ============================================================================

/// Derives `tagcheck::Record` and `tagcheck::AsValue` for a struct with named
/// fields.
///
/// Each field becomes a descriptor holding its declared name, whether it is
/// `pub`, its annotations and its value. Annotations are written as
/// `key = "text"` pairs inside `#[tag(...)]`; the key a validator reads is
/// `validate` unless configured otherwise.
///
/// # Attributes
///
/// - `#[tag(validate = "min=3,max=10")]` - validation directives
/// - `#[tag(validate = "-")]` - never validate this field
/// - `#[tag(validate = "...", form = "...")]` - several keys on one field
/// - `#[tag(skip)]` - leave the field out of the descriptor table; its type
///   needs no `AsValue` impl
///
/// Fields holding other records are traversed even without an annotation,
/// provided they are `pub`.
///
/// # Examples
///
/// ```rust,ignore
/// use tagcheck::Record;
///
/// #[derive(Record)]
/// pub struct Signup {
///     #[tag(validate = "min=3,attr=username")]
///     pub name: String,
///
///     #[tag(validate = "regexp=^[a-z]+@[a-z]+\\.[a-z]+$")]
///     pub email: String,
///
///     pub address: Address,
/// }
///
/// let errors = tagcheck::validate(&signup);
/// ```
///
/// # Errors
///
/// Enums, unions, tuple structs and unit structs are rejected at compile
/// time, as are unknown attribute shapes and repeated keys.
#[proc_macro_derive(Record, attributes(tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record_impl(input)
}
