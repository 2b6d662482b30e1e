use std::fmt;

/// One wallet to run, in file order
#[derive(Clone)]
pub struct Account {
    pub index: usize, // 1-based, used as log prefix
    pub private_key: String,
    pub proxy: Option<String>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("index", &self.index)
            .field("private_key", &"<redacted>")
            .field("proxy", &self.proxy)
            .finish()
    }
}
