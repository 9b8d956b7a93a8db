//! Newtype wrappers for identifiers coming from the content source.
//!
//! Modules, items and media references are all plain strings in the hosted data;
//! the wrappers keep them from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a quotation module.
    ModuleId
);

string_id!(
    /// Identifier of a line item inside a module.
    ItemId
);

string_id!(
    /// A media reference already resolved by the media store into a fetchable URI.
    MediaUri
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_ids_as_map_keys() {
        let mut images = HashMap::new();
        images.insert(MediaUri::new("media/logo.png"), 1);
        assert_eq!(images.get(&MediaUri::from("media/logo.png")), Some(&1));
    }

    #[test]
    fn test_transparent_serde() {
        let id: ItemId = serde_json::from_str("\"it-7\"").unwrap();
        assert_eq!(id.as_str(), "it-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"it-7\"");
    }
}
