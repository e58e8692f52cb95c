//! Authentication service.
//!
//! Email/password sign-up and sign-in over the document store. Passwords
//! are hashed with Argon2id before they leave this module; the plaintext
//! never reaches a repository.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use kola_core::{Email, UserRecord};
use kola_docstore::DocumentStore;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Special characters the password policy accepts (and requires one of).
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password fails the policy.
    /// Returns `AuthError::UserAlreadyExists` if the email is registered.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(first_name, last_name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a wrong email or a
    /// wrong password, without distinguishing which.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(user)
    }
}

/// Validate a password against the sign-up policy: at least 8 characters
/// drawn only from letters, digits, and `@$!%*?&`, with at least one
/// lowercase letter, one uppercase letter, one digit, and one special.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if let Some(bad) = password
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !PASSWORD_SPECIALS.contains(*c))
    {
        return Err(AuthError::WeakPassword(format!(
            "password may only contain letters, digits, and {PASSWORD_SPECIALS} (found '{bad}')"
        )));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AuthError::WeakPassword(
            "password must contain a lowercase letter".to_owned(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AuthError::WeakPassword(
            "password must contain an uppercase letter".to_owned(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword(
            "password must contain a digit".to_owned(),
        ));
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(AuthError::WeakPassword(format!(
            "password must contain a special character ({PASSWORD_SPECIALS})"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kola_docstore::MemoryStore;

    const GOOD_PASSWORD: &str = "Sunlit9!road";

    #[test]
    fn test_password_policy() {
        assert!(validate_password(GOOD_PASSWORD).is_ok());

        // Each rule in turn
        assert!(validate_password("Ab1!").is_err()); // too short
        assert!(validate_password("lowercase1!a").is_err()); // no uppercase
        assert!(validate_password("UPPERCASE1!A").is_err()); // no lowercase
        assert!(validate_password("NoDigits!!aB").is_err()); // no digit
        assert!(validate_password("NoSpecial1aB").is_err()); // no special
        assert!(validate_password("Has Space1!aB").is_err()); // char outside set
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password(GOOD_PASSWORD).expect("hash");
        assert!(verify_password(GOOD_PASSWORD, &hash).is_ok());
        assert!(matches!(
            verify_password("Wrong9!pass", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_then_sign_in() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let user = auth
            .register("Ada", "Obi", "ada@example.com", GOOD_PASSWORD)
            .await
            .expect("register");
        assert_eq!(user.email.as_str(), "ada@example.com");

        let signed_in = auth
            .sign_in("ada@example.com", GOOD_PASSWORD)
            .await
            .expect("sign in");
        assert_eq!(signed_in.id, user.id);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_and_unknown_email_same_error() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register("Ada", "Obi", "ada@example.com", GOOD_PASSWORD)
            .await
            .expect("register");

        let wrong_password = auth
            .sign_in("ada@example.com", "Wrong9!pass")
            .await
            .expect_err("should fail");
        let unknown_email = auth
            .sign_in("ghost@example.com", GOOD_PASSWORD)
            .await
            .expect_err("should fail");

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register("Ada", "Obi", "ada@example.com", GOOD_PASSWORD)
            .await
            .expect("register");

        let err = auth
            .register("Ada", "Obi", "ada@example.com", GOOD_PASSWORD)
            .await
            .expect_err("duplicate should fail");
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }
}
