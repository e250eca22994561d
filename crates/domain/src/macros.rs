//! Macro for mapping enums onto fixed wire names
//!
//! Remote protocol identifiers (web service function names, HTTP verbs) are
//! exact strings. This macro derives `as_str`, `Display` and `FromStr` from a
//! single variant-to-string table so the mapping is written once.
//!
//! # Example
//!
//! ```rust
//! use academy_enrol_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Format {
//!     Json,
//!     Xml,
//! }
//!
//! impl_wire_name_conversions!(Format {
//!     Json => "json",
//!     Xml => "xml",
//! });
//!
//! assert_eq!(Format::Json.as_str(), "json");
//! assert_eq!("xml".parse::<Format>(), Ok(Format::Xml));
//! ```

/// Implements `as_str`, `Display` and `FromStr` for wire-name enums.
///
/// Parsing is exact: remote identifiers are case-sensitive.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Unknown {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Verb {
        Fetch,
        Store,
    }

    impl_wire_name_conversions!(Verb {
        Fetch => "fetch_items",
        Store => "store_items",
    });

    #[test]
    fn displays_wire_name() {
        assert_eq!(Verb::Fetch.to_string(), "fetch_items");
        assert_eq!(Verb::Store.as_str(), "store_items");
    }

    #[test]
    fn parses_exact_names_only() {
        assert_eq!(Verb::from_str("store_items"), Ok(Verb::Store));
        assert!(Verb::from_str("STORE_ITEMS").is_err());
        assert!(Verb::from_str("").is_err());
    }

    #[test]
    fn unknown_name_error_mentions_type() {
        let err = Verb::from_str("drop_items").unwrap_err();
        assert!(err.contains("Unknown Verb: drop_items"));
    }
}
