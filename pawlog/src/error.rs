/// Error returned by the global accessor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "pawlog is not initialized: call `pawlog::init(..)` or `paw_config().init_global()` before using the logger"
    )]
    NotInitialized,
}
