use std::fmt;

/// The app registration used to talk to the billing API.
///
/// Built once at startup and only ever lent out.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub subscription_id: String,
}

// Keep the secret out of logs and panics.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("subscription_id", &self.subscription_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_secret() {
        let credentials = Credentials {
            tenant_id: "tenant".to_owned(),
            client_id: "client".to_owned(),
            client_secret: "hunter2".to_owned(),
            subscription_id: "sub".to_owned(),
        };

        let printed = format!("{:?}", credentials);

        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("tenant"));
    }
}
