//! Newtype string IDs for type-safe references.
//!
//! Use the `define_id!` macro to create ID wrappers that cannot be empty and
//! cannot be mixed up with IDs of another kind.

/// Error returned when constructing an ID from an empty string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} cannot be empty")]
pub struct IdError {
    /// Name of the ID type that rejected the input.
    pub kind: &'static str,
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain string, `Deserialize` that rejects empty strings
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()`, `as_str()`, `into_inner()`
/// - `Display`, `FromStr`, `AsRef<str>` and `TryFrom<String>`
///
/// # Example
///
/// ```rust
/// # use elena_menu_core::define_id;
/// define_id!(DishId);
/// define_id!(TableId);
///
/// let dish = DishId::parse("mapo-tofu").unwrap();
/// assert_eq!(dish.as_str(), "mapo-tofu");
/// assert!(TableId::parse("").is_err());
///
/// // These are different types, so this won't compile:
/// // let _: TableId = dish;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an ID, rejecting the empty string.
            ///
            /// # Errors
            ///
            /// Returns [`IdError`]($crate::IdError) if `id` is empty.
            pub fn parse(id: impl Into<String>) -> ::core::result::Result<Self, $crate::IdError> {
                let id = id.into();
                if id.is_empty() {
                    return Err($crate::IdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(id))
            }

            /// Get the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::core::convert::TryFrom<String> for $name {
            type Error = $crate::IdError;

            fn try_from(id: String) -> ::core::result::Result<Self, Self::Error> {
                Self::parse(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Menu dishes
define_id!(ItemId);
