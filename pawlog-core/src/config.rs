use std::sync::LazyLock;

use derive_from_env::FromEnv;

pub const DEFAULT_NAME: &str = "PAW";

#[derive(FromEnv)]
#[from_env(prefix = "PAWLOG")]
#[allow(non_snake_case)]
pub struct PawLogEnv {
    #[from_env(default = "PAW")]
    pub NAME: String,
    #[from_env(default = "5")]
    pub MAX_STACK_TRACES: usize,
    #[from_env(default = "true")]
    pub SHOW_NAME: bool,
}

impl Default for PawLogEnv {
    fn default() -> Self {
        Self {
            NAME: DEFAULT_NAME.into(),
            MAX_STACK_TRACES: 5,
            SHOW_NAME: true,
        }
    }
}

/// Defaults read once from `PAWLOG_*` variables. A malformed variable falls back to the built-in defaults.
pub static PAWLOG_ENV: LazyLock<PawLogEnv> =
    LazyLock::new(|| PawLogEnv::from_env().unwrap_or_else(|_| PawLogEnv::default()));
