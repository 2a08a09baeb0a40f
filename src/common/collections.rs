pub use std::collections::hash_map;
pub use std::collections::{BTreeMap, BTreeSet};

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
