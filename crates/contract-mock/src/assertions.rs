use crate::mock::MockHandle;
use crate::value::Value;

/// Panicking assertions over a mock's call log, for use inside test bodies.
pub struct CallAssertions<'a> {
    handle: &'a MockHandle,
}

impl<'a> CallAssertions<'a> {
    pub fn new(handle: &'a MockHandle) -> Self {
        Self { handle }
    }

    pub fn assert_called(&self, method: &str) {
        assert!(
            self.handle.call_count(method) > 0,
            "expected {}.{} to have been called",
            self.handle.label(),
            method
        );
    }

    pub fn assert_not_called(&self, method: &str) {
        assert_eq!(
            self.handle.call_count(method),
            0,
            "expected {}.{} not to have been called",
            self.handle.label(),
            method
        );
    }

    pub fn assert_call_count(&self, method: &str, expected: usize) {
        assert_eq!(self.handle.call_count(method), expected);
    }

    pub fn assert_last_args(&self, method: &str, expected: &[Value]) {
        let calls = self.handle.calls();
        let last = calls
            .iter()
            .rev()
            .find(|c| c.method == method)
            .unwrap_or_else(|| panic!("{}.{} was never called", self.handle.label(), method));
        assert_eq!(last.args.as_slice(), expected);
    }
}
