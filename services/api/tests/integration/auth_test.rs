use cgcs_api::error::ApiError;
use cgcs_api::password::verify_password;
use cgcs_api::usecase::auth::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
};
use cgcs_auth_types::token::validate_access_token;
use cgcs_domain::audit::AuditKind;
use cgcs_domain::user::{UserRole, UserStatus};

use crate::helpers::{MockAuditRepo, MockUserRepo, TEST_JWT_SECRET, test_user};

fn login_usecase(users: MockUserRepo, audit: MockAuditRepo) -> LoginUseCase<MockUserRepo, MockAuditRepo> {
    LoginUseCase {
        users,
        audit,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        ttl_secs: 3600,
    }
}

fn credentials(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_token_carrying_identity_on_login() {
    let mut user = test_user("chef@cgcs.ci", "motdepasse1", UserRole::ChefCentre);
    user.centre_id = Some(uuid::Uuid::now_v7());
    let users = MockUserRepo::new(vec![user.clone()]);
    let audit = MockAuditRepo::empty();

    let output = login_usecase(users.clone(), audit.clone())
        .execute(credentials("  Chef@CGCS.ci ", "motdepasse1"))
        .await
        .unwrap();

    let info = validate_access_token(&output.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.identity.user_id, user.id);
    assert_eq!(info.identity.role, UserRole::ChefCentre);
    assert_eq!(info.identity.centre_id, user.centre_id);
    assert_eq!(info.exp, output.access_token_exp);
    assert!(output.user.last_login_at.is_some());
    assert!(users.get(user.id).unwrap().last_login_at.is_some());
    assert_eq!(audit.kinds(), vec![AuditKind::Login]);
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_email_alike() {
    let user = test_user("admin@cgcs.ci", "motdepasse1", UserRole::Admin);
    let usecase = login_usecase(MockUserRepo::new(vec![user]), MockAuditRepo::empty());

    let wrong_password = usecase
        .execute(credentials("admin@cgcs.ci", "mauvais"))
        .await
        .unwrap_err();
    let unknown_email = usecase
        .execute(credentials("personne@cgcs.ci", "motdepasse1"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, ApiError::InvalidCredentials));
    assert!(matches!(unknown_email, ApiError::InvalidCredentials));
}

#[tokio::test]
async fn should_refuse_login_for_suspended_account() {
    let mut user = test_user("regisseur@cgcs.ci", "motdepasse1", UserRole::Regisseur);
    user.status = UserStatus::Suspended;
    let audit = MockAuditRepo::empty();
    let usecase = login_usecase(MockUserRepo::new(vec![user]), audit.clone());

    let err = usecase
        .execute(credentials("regisseur@cgcs.ci", "motdepasse1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AccountDisabled));
    assert!(audit.kinds().is_empty());
}

#[tokio::test]
async fn should_replace_password_and_clear_change_flag() {
    let mut user = test_user("chef@cgcs.ci", "ancien-mdp", UserRole::ChefCentre);
    user.must_change_password = true;
    let users = MockUserRepo::new(vec![user.clone()]);
    let audit = MockAuditRepo::empty();
    let usecase = ChangePasswordUseCase {
        users: users.clone(),
        audit: audit.clone(),
    };

    usecase
        .execute(
            user.id,
            ChangePasswordInput {
                current_password: "ancien-mdp".into(),
                new_password: "nouveau-mdp".into(),
            },
        )
        .await
        .unwrap();

    let stored = users.get(user.id).unwrap();
    assert!(verify_password("nouveau-mdp", &stored.password_hash));
    assert!(!stored.must_change_password);
    assert_eq!(audit.kinds(), vec![AuditKind::PasswordChange]);
}

#[tokio::test]
async fn should_keep_password_when_current_one_is_wrong() {
    let user = test_user("chef@cgcs.ci", "ancien-mdp", UserRole::ChefCentre);
    let users = MockUserRepo::new(vec![user.clone()]);
    let usecase = ChangePasswordUseCase {
        users: users.clone(),
        audit: MockAuditRepo::empty(),
    };

    let err = usecase
        .execute(
            user.id,
            ChangePasswordInput {
                current_password: "pas-le-bon".into(),
                new_password: "nouveau-mdp".into(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidCredentials));
    assert!(verify_password("ancien-mdp", &users.get(user.id).unwrap().password_hash));
}
