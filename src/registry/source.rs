use std::fmt::Debug;
use std::sync::Arc;

use crate::authority::AuthorityFactory;
use crate::operation::CoordinateOperationFactory;

/// Process-wide extension point contributing factories at runtime.
///
/// A source is queried when it is registered and again on every registry
/// reset, so plugins can change the factory set they expose over time. Both
/// methods default to contributing nothing; a source implements whichever
/// side it serves.
pub trait ProviderSource: Debug + Send + Sync {
    /// Authority factories this source currently contributes.
    fn authority_factories(&self) -> Vec<Arc<dyn AuthorityFactory>> {
        Vec::new()
    }

    /// Coordinate-operation factories this source currently contributes.
    fn operation_factories(&self) -> Vec<Arc<dyn CoordinateOperationFactory>> {
        Vec::new()
    }
}
