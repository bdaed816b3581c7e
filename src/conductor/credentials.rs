pub const MAX_CREDENTIAL_LEN: usize = 50;

/// Checks a conductor's id and password.
pub trait CredentialVerifier {
    fn verify(&self, id: &str, password: &str) -> bool;
}

/// Accepts exactly one id/password pair.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    id: String,
    password: String,
}

impl Default for FixedCredentials {
    fn default() -> Self {
        Self::new("COND001", "password123")
    }
}

impl FixedCredentials {
    pub fn new(id: &str, password: &str) -> Self {
        Self {
            id: id.to_string(),
            password: password.to_string(),
        }
    }
}

impl CredentialVerifier for FixedCredentials {
    fn verify(&self, id: &str, password: &str) -> bool {
        if id.chars().count() > MAX_CREDENTIAL_LEN || password.chars().count() > MAX_CREDENTIAL_LEN {
            return false;
        }
        let (id, password) = (id.trim(), password.trim());
        !id.is_empty() && id == self.id && password == self.password
    }
}

#[test]
fn accepts_demo_pair() {
    let credentials = FixedCredentials::default();
    assert!(credentials.verify("COND001", "password123"));
    assert!(credentials.verify(" COND001 ", "password123\t"));
}

#[test]
fn rejects_everything_else() {
    let credentials = FixedCredentials::default();
    assert!(!credentials.verify("COND002", "password123"));
    assert!(!credentials.verify("COND001", "Password123"));
    assert!(!credentials.verify("", ""));
    assert!(!credentials.verify("cond001", "password123"));
}
