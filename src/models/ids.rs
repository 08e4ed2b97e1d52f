//! Identifier newtypes.
//!
//! Catalog identities (venue, work, group, edition) are opaque strings
//! owned by the catalog subsystem. Schedule entry identities are
//! sequential integers issued by the store.

/// Defines a newtype ID wrapper and generates derives, `Display`,
/// `From` conversions and `new`/`as_str` (string) or `new`/`value` (integer).
macro_rules! define_id_type {
    (String, $name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(v: &str) -> Self {
                $name(v.to_string())
            }
        }

        impl ::std::convert::From<String> for $name {
            fn from(v: String) -> Self {
                $name(v)
            }
        }

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                $name(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
    ($inner:ty, $name:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl $name {
            pub fn new(value: $inner) -> Self {
                $name(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }
        }
    };
}

define_id_type!(String, VenueId);
define_id_type!(String, WorkId);
define_id_type!(String, GroupId);
define_id_type!(String, EditionId);
define_id_type!(u64, EntryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_id_serializes_transparently() {
        let id = VenueId::new("hall-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"hall-1\"");
        let back: VenueId = serde_json::from_str("\"hall-1\"").unwrap();
        assert_eq!(back, id);
        assert_eq!(id.to_string(), "hall-1");
    }

    #[test]
    fn test_entry_id_ordering() {
        assert!(EntryId::new(1) < EntryId::new(2));
        assert_eq!(EntryId::from(7).value(), 7);
        assert_eq!(serde_json::to_string(&EntryId::new(7)).unwrap(), "7");
    }
}
