#[cfg(test)]
mod tests {
    use crate::core::auth::{
        AuthError, AuthService, ChangePasswordRequest, JwtConfig, JwtService, LoginRequest,
        PasswordHasher, PasswordViolation, RegisterRequest, validate_password,
    };
    use crate::core::db::{
        CredentialStore, FAILED_LOGIN_DESCRIPTION, MemoryCredentialStore,
        PASSWORD_CHANGED_DESCRIPTION,
    };

    const SECRET: &str = "flow_test_secret";

    fn service() -> AuthService<MemoryCredentialStore> {
        AuthService::new(
            MemoryCredentialStore::new(),
            PasswordHasher::new(4),
            JwtService::new(JwtConfig::new(SECRET)),
        )
    }

    async fn register(service: &AuthService<MemoryCredentialStore>, email: &str) -> uuid::Uuid {
        service
            .register(RegisterRequest {
                name: "alice".to_string(),
                email: email.to_string(),
                password: "Abcdef1!".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn stored_hash(service: &AuthService<MemoryCredentialStore>, email: &str) -> String {
        service
            .store()
            .find_user_by_email(email)
            .await
            .unwrap()
            .unwrap()
            .password_hash
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn change(email: &str, current: &str, new: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            email: email.to_string(),
            password: current.to_string(),
            new_password: new.to_string(),
        }
    }

    #[test]
    fn test_missing_digit_reports_only_digit() {
        let violations = validate_password("Abcdefgh!");
        assert_eq!(violations, vec![PasswordViolation::MissingDigit]);
    }

    #[tokio::test]
    async fn test_registered_hash_verifies_only_original_password() {
        let service = service();
        register(&service, "alice@example.com").await;

        let hash = stored_hash(&service, "alice@example.com").await;
        let hasher = PasswordHasher::new(4);

        assert!(hasher.verify("Abcdef1!", &hash).unwrap());
        for other in ["abcdef1!", "Abcdef1", "Abcdef1!!", "Newpass1$", ""] {
            assert!(!hasher.verify(other, &hash).unwrap(), "{:?} verified", other);
        }
    }

    #[tokio::test]
    async fn test_long_password_login_needs_every_byte() {
        let service = service();
        let prefix = format!("Aa1!{}", "x".repeat(68));
        let password = format!("{}REALSECRET", prefix);
        service
            .register(RegisterRequest {
                name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: password.clone(),
            })
            .await
            .unwrap();

        let impostor = format!("{}totally-different", prefix);
        assert!(matches!(
            service.login(login("alice@example.com", &impostor)).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(service.login(login("alice@example.com", &password)).await.is_ok());
    }

    #[tokio::test]
    async fn test_login_token_decodes_to_registered_user() {
        let service = service();
        let user_id = register(&service, "alice@example.com").await;

        let response = service
            .login(login("alice@example.com", "Abcdef1!"))
            .await
            .unwrap();

        let claims = JwtService::new(JwtConfig::new(SECRET))
            .validate_token(&response.token)
            .unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.user_name, "alice");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let service = service();
        let user_id = register(&service, "alice@example.com").await;

        let wrong = service
            .login(login("alice@example.com", "Wrong1!xx"))
            .await
            .unwrap_err();
        let unknown = service
            .login(login("nobody@example.com", "Abcdef1!"))
            .await
            .unwrap_err();

        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());

        let logs = service.store().logs_for_user(user_id).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].description, FAILED_LOGIN_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_change_password_swaps_hash_and_logs_once() {
        let service = service();
        let user_id = register(&service, "alice@example.com").await;

        service
            .change_password(change("alice@example.com", "Abcdef1!", "Newpass1$"))
            .await
            .unwrap();

        let hash = stored_hash(&service, "alice@example.com").await;
        let hasher = PasswordHasher::new(4);
        assert!(!hasher.verify("Abcdef1!", &hash).unwrap());
        assert!(hasher.verify("Newpass1$", &hash).unwrap());

        let logs = service.store().logs_for_user(user_id).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].description, PASSWORD_CHANGED_DESCRIPTION);

        assert!(matches!(
            service.login(login("alice@example.com", "Abcdef1!")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_password_changes_leave_one_hash() {
        let service = service();
        let user_id = register(&service, "alice@example.com").await;

        let first = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .change_password(change("alice@example.com", "Abcdef1!", "Newpass1$"))
                    .await
            })
        };
        let second = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .change_password(change("alice@example.com", "Abcdef1!", "Other2@pw"))
                    .await
            })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        assert!(succeeded >= 1);

        let hash = stored_hash(&service, "alice@example.com").await;
        let hasher = PasswordHasher::new(4);
        let first_matches = hasher.verify("Newpass1$", &hash).unwrap();
        let second_matches = hasher.verify("Other2@pw", &hash).unwrap();
        assert!(first_matches ^ second_matches);

        let logs = service.store().logs_for_user(user_id).await;
        assert_eq!(logs.len(), succeeded);
    }
}
