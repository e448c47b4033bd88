use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! content_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            #[doc = concat!("Creates a new `", stringify!($name), "`")]
            #[must_use]
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying i64 value
            #[must_use]
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

content_id!(
    /// Identifier of a curriculum module
    ModuleId
);
content_id!(
    /// Identifier of a level inside a module
    LevelId
);
content_id!(
    /// Identifier of a chapter inside a level
    ChapterId
);
content_id!(
    /// Identifier of a slide inside a chapter or highlight section
    SlideId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_formats() {
        let id = ModuleId::new(7);
        assert_eq!(format!("{id:?}"), "ModuleId(7)");
        assert_eq!(id.to_string(), "7");
        assert_eq!(SlideId::new(3).value(), 3);
    }

    #[test]
    fn deserializes_from_plain_integer() {
        let id: ChapterId = serde_json::from_str("100").unwrap();
        assert_eq!(id, ChapterId::new(100));
    }
}
