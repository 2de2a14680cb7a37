//! Nullable executor — records proposal calls instead of performing them.

use vault_types::{Address, AssetAmount, AssetError, Executor};

/// A call the executor was asked to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutedCall {
    pub target: Address,
    pub value: AssetAmount,
    pub data: Vec<u8>,
}

/// An executor that records every call for later inspection.
///
/// `set_fail(true)` makes every call fail, for exercising execution
/// atomicity (the registry must revert its `executed` flag).
pub struct NullExecutor {
    pub calls: Vec<ExecutedCall>,
    fail: bool,
}

impl NullExecutor {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail: false,
        }
    }

    pub fn set_fail(&mut self, fail: bool) {
        self.fail = fail;
    }
}

impl Default for NullExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for NullExecutor {
    fn execute(
        &mut self,
        target: &Address,
        value: AssetAmount,
        data: &[u8],
    ) -> Result<(), AssetError> {
        if self.fail {
            return Err(AssetError::Rejected("executor failure".to_string()));
        }
        self.calls.push(ExecutedCall {
            target: target.clone(),
            value,
            data: data.to_vec(),
        });
        Ok(())
    }
}
