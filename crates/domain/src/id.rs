//! Typed identifier newtypes backed by UUIDs.
//!
//! Identifier types are chosen by the consumer; [`define_id!`](crate::define_id)
//! declares one with the traits models and generators expect
//! (`Ord`, `Hash`, `Display`, `FromStr`, serde, `From<Uuid>`).

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use uuid;
}

/// Declare a UUID-backed identifier newtype.
///
/// ```
/// hexkit_domain::define_id!(
///     /// Identifier of a note.
///     NoteId
/// );
///
/// let id = NoteId::new();
/// assert_eq!(id, id.to_string().parse().unwrap());
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::id::__private::uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self($crate::id::__private::uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// The all-zero identifier, used as a placeholder before creation.
            #[must_use]
            pub fn nil() -> Self {
                Self($crate::id::__private::uuid::Uuid::nil())
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> $crate::id::__private::uuid::Uuid {
                self.0
            }
        }

        impl From<$crate::id::__private::uuid::Uuid> for $name {
            fn from(uuid: $crate::id::__private::uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::id::__private::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::id::__private::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl $crate::id::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::id::__private::serde::Serializer,
            {
                $crate::id::__private::serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> $crate::id::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::id::__private::serde::Deserializer<'de>,
            {
                use $crate::id::__private::serde::Deserialize as _;
                $crate::id::__private::uuid::Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}
