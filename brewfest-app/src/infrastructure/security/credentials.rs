use sha2::{Digest, Sha256};

/// Admin username/password pair, held as digests.
#[derive(Clone)]
pub struct AdminCredentials {
    username: [u8; 32],
    password: [u8; 32],
}

impl AdminCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: digest(username),
            password: digest(password),
        }
    }

    /// Both halves are always compared so the timing does not reveal which one failed.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = constant_time_eq(&self.username, &digest(username));
        let password_ok = constant_time_eq(&self.password, &digest(password));
        username_ok & password_ok
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials").finish_non_exhaustive()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
