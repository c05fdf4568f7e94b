#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros for the contest workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! contest-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a context-aware error type.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to `Result<T, Source>` for every source-carrying variant.
/// * **Standard Conversions**: Implements `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]`/`#[from]`), enabling `?` on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Formatting Helper**: Emits a private `format_context` function for `#[error(...)]`
///   strings, rendering ` (context)` or nothing.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also have a `context` field.
///
/// # Example
///
/// ```rust
/// use contest_derive::contest_error;
/// use std::borrow::Cow;
///
/// #[contest_error]
/// pub enum LoadError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, LoadError> {
///     let text = std::fs::read_to_string(path).context("Reading settings file")?;
///     if text.is_empty() {
///         return Err("settings file is empty".into());
///     }
///     Ok(text)
/// }
///
/// let err = read("/definitely/not/here").unwrap_err();
/// assert!(err.to_string().starts_with("IO error (Reading settings file)"));
/// ```
///
/// Tuple variants are rejected:
///
/// ```compile_fail
/// #[contest_derive::contest_error]
/// pub enum Broken {
///     #[error("IO error: {0}")]
///     Io(std::io::Error),
/// }
/// ```
///
/// So are source variants without a context field:
///
/// ```compile_fail
/// #[contest_derive::contest_error]
/// pub enum Broken {
///     #[error("IO error: {source}")]
///     Io { source: std::io::Error },
/// }
/// ```
#[proc_macro_attribute]
pub fn contest_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).unwrap_or_else(syn::Error::into_compile_error).into()
}
