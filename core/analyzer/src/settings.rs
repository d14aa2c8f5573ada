use serde::{Deserialize, Serialize};

/// Rule configuration, fixed before any file is analysed.
///
/// Keys are read in kebab-case (`check-blocking-sends`); the camelCase names
/// used by other linters' configuration (`checkBlockingSends`) are accepted as
/// aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Report `make(chan T)` without a capacity.
    #[serde(alias = "checkUnbufferedChannels")]
    pub check_unbuffered_channels: bool,
    /// Largest accepted literal capacity; `0` disables the capacity checks.
    #[serde(alias = "checkBufferAmount")]
    pub check_buffer_amount: u64,
    /// Report sends that may block forever.
    #[serde(alias = "checkBlockingSends")]
    pub check_blocking_sends: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_unbuffered_channels: false,
            check_buffer_amount: 0,
            check_blocking_sends: true,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn buffer_limit(&self) -> Option<u64> {
        (self.check_buffer_amount > 0).then_some(self.check_buffer_amount)
    }
}
