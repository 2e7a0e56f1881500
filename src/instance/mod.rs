//! Data instances
//!
//! [`Instance`] is the identity/label/payload contract shared by every
//! instance kind in a dataset; [`GraphInstance`] specializes the payload to a
//! dense adjacency matrix.

pub mod graph;
pub(crate) mod normalize;

pub use graph::{GraphInstance, GraphInstanceBuilder};
pub use normalize::{
    DEFAULT_EDGE_FEATURE, DEFAULT_EDGE_WEIGHT, DEFAULT_FEATURE_WIDTH, DEFAULT_NODE_FEATURE,
};

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

/// Instance identifier, unique within its dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// Prediction target attached to an instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Label {
    /// Class index (classification)
    Class(i64),
    /// Continuous target (regression)
    Value(f64),
}

/// Non-owning back-reference to the dataset that holds an instance
///
/// The handle is opaque to instances: it is stored and shared on copy but
/// never dereferenced here. Owners recover their concrete type with
/// [`DatasetHandle::upgrade`].
#[derive(Clone)]
pub struct DatasetHandle(Weak<dyn Any + Send + Sync>);

impl DatasetHandle {
    /// Handle to `dataset` that does not keep it alive
    pub fn new<T: Any + Send + Sync>(dataset: &Arc<T>) -> Self {
        let weak: Weak<T> = Arc::downgrade(dataset);
        Self(weak)
    }

    /// Recover the dataset if it is still alive and of type `T`
    #[must_use]
    pub fn upgrade<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.0.upgrade()?.downcast::<T>().ok()
    }

    /// Whether the dataset has not been dropped
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Whether both handles point at the same dataset
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DatasetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Identity, label and payload of a dataset instance
pub trait Instance {
    /// Backing payload type
    type Data;

    /// Instance identifier
    fn id(&self) -> InstanceId;

    /// Prediction target
    fn label(&self) -> &Label;

    /// Backing payload
    fn data(&self) -> &Self::Data;

    /// Enclosing dataset, if the instance was attached to one
    fn dataset(&self) -> Option<&DatasetHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dataset {
        name: &'static str,
    }

    #[test]
    fn test_dataset_handle_upgrade() {
        let dataset = Arc::new(Dataset { name: "mutag" });
        let handle = DatasetHandle::new(&dataset);

        assert!(handle.is_alive());
        let upgraded = handle.upgrade::<Dataset>().unwrap();
        assert_eq!(upgraded.name, "mutag");
        assert!(handle.upgrade::<String>().is_none());
    }

    #[test]
    fn test_dataset_handle_does_not_own() {
        let dataset = Arc::new(Dataset { name: "tmp" });
        let handle = DatasetHandle::new(&dataset);
        let shared = handle.clone();

        assert!(handle.ptr_eq(&shared));
        drop(dataset);
        assert!(!handle.is_alive());
        assert!(shared.upgrade::<Dataset>().is_none());
    }
}
