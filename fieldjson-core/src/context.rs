use std::sync::Arc;

use fieldjson_zero::ZeroRegistry;

/// Shared engine state threaded through every marshal/unmarshal call.
///
/// The default context binds the process-wide zero-value registry;
/// tests substitute a private registry with [`Context::with_registry`]
/// to stay isolated from global registrations.
#[derive(Clone)]
pub struct Context {
    registry: Arc<ZeroRegistry>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context bound to the given registry instead of the global one.
    #[must_use]
    pub fn with_registry(registry: Arc<ZeroRegistry>) -> Self {
        Self { registry }
    }

    /// The zero-value registry this context consults.
    #[must_use]
    pub fn registry(&self) -> &ZeroRegistry {
        &self.registry
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            registry: ZeroRegistry::global(),
        }
    }
}
