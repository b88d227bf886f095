//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use fcommon::{PropertyBag, RawPayload, SessionId, merge_absent};
//!
//! let session = SessionId::from("session-1");
//! let mut target = None;
//! let mut incoming = PropertyBag::new();
//! incoming.insert("tenant".to_string(), "acme".into());
//! merge_absent(&mut target, Some(&incoming));
//!
//! let raw = RawPayload::new(42_u32);
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(target.as_ref().map(PropertyBag::len), Some(1));
//! assert_eq!(raw.downcast_ref::<u32>(), Some(&42));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use fcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Property bags and cross-crate identifier newtypes.
    //!
    //! ```rust
    //! use fcommon::{PropertyBag, SessionId, merge_absent};
    //!
    //! let mut existing = PropertyBag::new();
    //! existing.insert("region".to_string(), "eu".into());
    //! let mut target = Some(existing);
    //!
    //! let mut incoming = PropertyBag::new();
    //! incoming.insert("region".to_string(), "us".into());
    //! incoming.insert("tier".to_string(), "gold".into());
    //! merge_absent(&mut target, Some(&incoming));
    //!
    //! let merged = target.expect("bag should exist");
    //! assert_eq!(merged["region"], "eu");
    //! assert_eq!(merged["tier"], "gold");
    //! assert_eq!(SessionId::new("session-42").to_string(), "session-42");
    //! ```

    use std::fmt::{Display, Formatter};

    /// Insertion-ordered, string-keyed bag of opaque extension values.
    pub type PropertyBag = serde_json::Map<String, serde_json::Value>;

    /// Merges `source` into `target`, keeping existing keys.
    ///
    /// When `target` has no bag yet it receives a clone of `source` wholesale.
    pub fn merge_absent(target: &mut Option<PropertyBag>, source: Option<&PropertyBag>) {
        let Some(source) = source else {
            return;
        };

        match target {
            Some(existing) => {
                for (key, value) in source {
                    if !existing.contains_key(key) {
                        existing.insert(key.clone(), value.clone());
                    }
                }
            }
            None => *target = Some(source.clone()),
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod raw {
    //! Opaque handles to provider-specific payloads.
    //!
    //! ```rust
    //! use fcommon::RawPayload;
    //!
    //! let payload = RawPayload::new(String::from("{\"id\":\"chunk-1\"}"));
    //! let copy = payload.clone();
    //!
    //! assert_eq!(payload, copy);
    //! assert_ne!(payload, RawPayload::new(String::from("{\"id\":\"chunk-1\"}")));
    //! assert!(payload.downcast_ref::<String>().is_some());
    //! ```

    use std::any::Any;
    use std::fmt::{Debug, Formatter};
    use std::sync::Arc;

    /// Shared handle to whatever the provider handed over. Equality is identity.
    #[derive(Clone)]
    pub struct RawPayload(Arc<dyn Any + Send + Sync>);

    impl RawPayload {
        pub fn new<T>(value: T) -> Self
        where
            T: Any + Send + Sync,
        {
            Self(Arc::new(value))
        }

        pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
            self.0.downcast_ref::<T>()
        }

        pub fn ptr_eq(&self, other: &Self) -> bool {
            Arc::ptr_eq(&self.0, &other.0)
        }
    }

    impl Debug for RawPayload {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("RawPayload(..)")
        }
    }

    impl PartialEq for RawPayload {
        fn eq(&self, other: &Self) -> bool {
            self.ptr_eq(other)
        }
    }
}

pub use context::{PropertyBag, SessionId, merge_absent};
pub use future::BoxFuture;
pub use raw::RawPayload;

#[cfg(test)]
mod tests {
    use super::{PropertyBag, RawPayload, SessionId, merge_absent};

    #[test]
    fn id_newtypes_round_trip_strings() {
        let session = SessionId::new("session-1");
        let from_str = SessionId::from("session-1");

        assert_eq!(session.as_str(), "session-1");
        assert_eq!(session.to_string(), "session-1");
        assert_eq!(session, from_str);
    }

    #[test]
    fn merge_absent_keeps_first_writer_per_key() {
        let mut first = PropertyBag::new();
        first.insert("a".to_string(), 1.into());
        let mut target = Some(first);

        let mut second = PropertyBag::new();
        second.insert("a".to_string(), 2.into());
        second.insert("b".to_string(), 3.into());
        merge_absent(&mut target, Some(&second));

        let merged = target.expect("bag should exist");
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 3);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn merge_absent_clones_wholesale_into_empty_target_and_ignores_missing_source() {
        let mut target = None;
        merge_absent(&mut target, None);
        assert!(target.is_none());

        let mut source = PropertyBag::new();
        source.insert("k".to_string(), "v".into());
        merge_absent(&mut target, Some(&source));
        assert_eq!(target, Some(source));
    }

    #[test]
    fn raw_payload_equality_is_identity() {
        let payload = RawPayload::new(7_i32);
        let same = payload.clone();
        let other = RawPayload::new(7_i32);

        assert_eq!(payload, same);
        assert_ne!(payload, other);
        assert_eq!(payload.downcast_ref::<i32>(), Some(&7));
        assert_eq!(payload.downcast_ref::<u8>(), None);
    }
}
