
pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
