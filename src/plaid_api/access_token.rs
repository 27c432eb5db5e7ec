use std::fmt::{self, Debug};

/// Long-lived bearer credential for one linked Plaid item.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    access_token: String,
}

impl AccessToken {
    pub fn new(access_token: String) -> AccessToken {
        AccessToken { access_token }
    }

    pub fn get(&self) -> &str {
        &self.access_token
    }
}

// The token is a secret, keep it out of logs.
impl Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_leak_token() {
        let token = AccessToken::new("access-sandbox-1234".to_string());
        let debug = format!("{token:?}");
        assert!(!debug.contains("access-sandbox-1234"));
        assert_eq!("access-sandbox-1234", token.get());
    }
}
