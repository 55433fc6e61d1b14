use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each surface of the daemon (filesystem gateway, schema tools, ...)
/// implements this trait. The binary entry point collects all modules and
/// merges their routes into a single Router.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes. Paths are absolute.
    fn routes(&self) -> Router;
}
