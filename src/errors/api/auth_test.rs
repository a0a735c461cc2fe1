#[cfg(test)]
mod tests {
    use crate::errors::AuthError;
    use crate::errors::internal::{CredentialError, InternalError};
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_converts_to_internal_server_error() {
        let internal_err = InternalError::database("upsert", DbErr::Custom("locked".to_string()));
        let auth_err = AuthError::from_internal_error(internal_err);

        assert!(matches!(auth_err, AuthError::InternalError(_)));
        assert_eq!(auth_err.message(), "An internal error occurred");
    }

    #[test]
    fn test_crypto_error_converts_to_internal_server_error() {
        let internal_err = InternalError::crypto("hash_password", "bad params");
        let auth_err = AuthError::from_internal_error(internal_err);

        assert_eq!(auth_err.message(), "An internal error occurred");
    }

    #[test]
    fn test_unknown_user_and_bad_password_are_indistinguishable() {
        let unknown = AuthError::from(InternalError::from(CredentialError::UnknownUser("ghost".to_string())));
        let bad = AuthError::from(InternalError::from(CredentialError::BadCredentials));

        assert_eq!(unknown.code(), "invalid_credentials");
        assert_eq!(bad.code(), "invalid_credentials");
        assert_eq!(unknown.message(), bad.message());
    }

    #[test]
    fn test_status_flags_keep_distinct_codes() {
        let cases = [
            (CredentialError::Disabled("u".to_string()), "account_disabled"),
            (CredentialError::AccountExpired("u".to_string()), "account_expired"),
            (CredentialError::CredentialsExpired("u".to_string()), "credentials_expired"),
            (CredentialError::AccountLocked("u".to_string()), "account_locked"),
        ];

        for (credential_error, expected_code) in cases {
            let auth_err = AuthError::from(InternalError::from(credential_error));
            assert_eq!(auth_err.code(), expected_code);
        }
    }

    #[test]
    fn test_duplicate_username_converts_correctly() {
        let internal_err = InternalError::Credential(CredentialError::DuplicateUsername("testuser".to_string()));
        let auth_err = AuthError::from_internal_error(internal_err);

        assert!(matches!(auth_err, AuthError::DuplicateUsername(_)));
        assert_eq!(auth_err.message(), "Username already exists");
    }

    #[test]
    fn test_invalid_registration_keeps_reason() {
        let internal_err = InternalError::from(CredentialError::InvalidRegistration("Username must not be blank"));
        let auth_err = AuthError::from_internal_error(internal_err);

        assert!(matches!(auth_err, AuthError::InvalidRegistration(_)));
        assert_eq!(auth_err.code(), "invalid_registration");
        assert_eq!(auth_err.message(), "Username must not be blank");
    }
}
