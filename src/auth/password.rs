use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a candidate password against a stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, stored_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash_password("correct horse battery").expect("hash");
        assert_ne!(hashed, "correct horse battery");
        assert!(verify_password("correct horse battery", &hashed).expect("verify"));
        assert!(!verify_password("wrong password", &hashed).expect("verify"));
    }
}
