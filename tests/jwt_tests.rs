use resite_backend::config::JwtConfig;
use resite_backend::util::jwt::*;

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

struct TestUser {
    id: String,
    email: String,
    role: String,
}

impl TestUser {
    fn new_user() -> Self {
        Self {
            id: "user123".to_string(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
        }
    }

    fn new_admin() -> Self {
        Self {
            id: "admin456".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }
}

#[test]
fn test_jwt_utils_creation() {
    let jwt_utils = create_test_jwt_utils();
    assert!(!jwt_utils.jwt_config.jwt_secret.is_empty());
    assert!(jwt_utils.jwt_config.access_token_expiration > 0);
    assert!(jwt_utils.jwt_config.refresh_token_expiration > 0);
}

#[test]
fn test_token_type_as_str() {
    assert_eq!(TokenType::Access.as_str(), "access");
    assert_eq!(TokenType::Refresh.as_str(), "refresh");
}

#[test]
fn test_generate_access_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let token = jwt_utils.generate_access_token(&user.id, &user.email, &user.role).unwrap();
    assert!(!token.is_empty());

    let claims = jwt_utils.validate_access_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, user.role);
    assert_eq!(claims.token_type, "access");
}

#[test]
fn test_generate_refresh_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_admin();

    let token = jwt_utils.generate_refresh_token(&user.id, &user.email, &user.role).unwrap();
    assert!(!token.is_empty());

    let claims = jwt_utils.validate_refresh_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, user.role);
    assert_eq!(claims.token_type, "refresh");
}

#[test]
fn test_generate_token_pair_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let token_pair = jwt_utils.generate_token_pair(&user.id, &user.email, &user.role).unwrap();
    assert!(!token_pair.access_token.is_empty());
    assert!(!token_pair.refresh_token.is_empty());
    assert_eq!(token_pair.expires_in, jwt_utils.jwt_config.access_token_expiration * 60);
    assert_eq!(token_pair.token_type, "Bearer");

    assert!(jwt_utils.validate_access_token(&token_pair.access_token).is_ok());
    assert!(jwt_utils.validate_refresh_token(&token_pair.refresh_token).is_ok());
}

#[test]
fn test_validate_access_token_wrong_type() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();
    let refresh_token = jwt_utils.generate_refresh_token(&user.id, &user.email, &user.role).unwrap();

    let result = jwt_utils.validate_access_token(&refresh_token);
    match result.unwrap_err() {
        JwtError::InvalidTokenType { expected, actual } => {
            assert_eq!(expected, "access");
            assert_eq!(actual, "refresh");
        }
        _ => panic!("Expected InvalidTokenType error"),
    }
}

#[test]
fn test_validate_refresh_token_wrong_type() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();
    let access_token = jwt_utils.generate_access_token(&user.id, &user.email, &user.role).unwrap();

    let result = jwt_utils.validate_refresh_token(&access_token);
    match result.unwrap_err() {
        JwtError::InvalidTokenType { expected, actual } => {
            assert_eq!(expected, "refresh");
            assert_eq!(actual, "access");
        }
        _ => panic!("Expected InvalidTokenType error"),
    }
}

#[test]
fn test_validate_token_with_invalid_secret() {
    let config1 = JwtConfig {
        jwt_secret: "secret1_that_is_long_enough_for_security_requirements_here".to_string(),
        access_token_expiration: 15,
        refresh_token_expiration: 10080,
    };
    let config2 = JwtConfig {
        jwt_secret: "secret2_that_is_long_enough_for_security_requirements_here".to_string(),
        access_token_expiration: 15,
        refresh_token_expiration: 10080,
    };

    let jwt_utils_1 = JwtTokenUtilsImpl::new(config1);
    let jwt_utils_2 = JwtTokenUtilsImpl::new(config2);
    let user = TestUser::new_user();

    let token = jwt_utils_1.generate_access_token(&user.id, &user.email, &user.role).unwrap();
    let result = jwt_utils_2.validate_access_token(&token);

    match result.unwrap_err() {
        JwtError::DecodingFailed(_) => (),
        _ => panic!("Expected DecodingFailed error"),
    }
}

#[test]
fn test_validate_malformed_token() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.validate_access_token("invalid.token.format");
    match result.unwrap_err() {
        JwtError::DecodingFailed(_) => (),
        _ => panic!("Expected DecodingFailed error"),
    }
}

#[test]
fn test_extract_token_from_header_success() {
    let jwt_utils = create_test_jwt_utils();

    let token = jwt_utils.extract_token_from_header("Bearer abc.def.ghi").unwrap();
    assert_eq!(token, "abc.def.ghi");
}

#[test]
fn test_extract_token_from_header_rejects_bad_scheme() {
    let jwt_utils = create_test_jwt_utils();

    assert!(jwt_utils.extract_token_from_header("Basic abc").is_err());
    assert!(jwt_utils.extract_token_from_header("Bearer ").is_err());
    assert!(jwt_utils.extract_token_from_header("").is_err());
}

#[test]
fn test_tokens_have_unique_jti() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let token1 = jwt_utils.generate_access_token(&user.id, &user.email, &user.role).unwrap();
    let token2 = jwt_utils.generate_access_token(&user.id, &user.email, &user.role).unwrap();

    let claims1 = jwt_utils.validate_access_token(&token1).unwrap();
    let claims2 = jwt_utils.validate_access_token(&token2).unwrap();
    assert_ne!(claims1.jti, claims2.jti);
}
