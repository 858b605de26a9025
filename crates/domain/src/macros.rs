//! Macro for implementing Display and FromStr for closed domain enums
//!
//! This macro eliminates boilerplate for enum conversions by providing a
//! single implementation for both Display and FromStr traits. Parsing is
//! case-insensitive; display always uses the canonical spelling.
//!
//! # Example
//!
//! ```rust
//! use courier_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Verb {
//!     Get,
//!     Post,
//! }
//!
//! impl_domain_enum_conversions!(Verb {
//!     Get => "GET",
//!     Post => "POST",
//! });
//!
//! assert_eq!(Verb::Get.to_string(), "GET");
//! assert_eq!("post".parse::<Verb>(), Ok(Verb::Post));
//! ```

/// Implements Display and FromStr traits for closed domain enums
///
/// This macro generates:
/// - Display trait: writes the canonical string of each variant
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their canonical string
///   representations
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return ::std::result::Result::Ok(Self::$variant);
                    }
                )+
                ::std::result::Result::Err(::std::format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
