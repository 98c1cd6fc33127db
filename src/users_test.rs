use super::*;

// =============================================================================
// PATHS
// =============================================================================

#[test]
fn list_users_path_carries_pagination() {
    assert_eq!(list_users_path(0, 50), "/api/users?skip=0&limit=50");
    assert_eq!(list_users_path(100, 25), "/api/users?skip=100&limit=25");
}

#[test]
fn user_paths_interpolate_id_once() {
    assert_eq!(user_path(42), "/api/users/42");
    assert_eq!(user_action_path(42, "activate"), "/api/users/42/activate");
    assert_eq!(user_action_path(7, "deactivate"), "/api/users/7/deactivate");
}

// =============================================================================
// ACTIVATION-FLAG NORMALIZATION
// =============================================================================

fn user_from(json: serde_json::Value) -> User {
    serde_json::from_value(json).unwrap()
}

fn base_user(extra: serde_json::Value) -> serde_json::Value {
    let mut value = serde_json::json!({
        "id": 1,
        "email": "a@b.com",
        "username": "anh",
        "role": "user"
    });
    value.as_object_mut().unwrap().extend(
        extra.as_object().unwrap().iter().map(|(k, v)| (k.clone(), v.clone())),
    );
    value
}

#[test]
fn is_activate_alone_is_normalized() {
    let user = user_from(base_user(serde_json::json!({ "is_activate": false })));
    assert_eq!(user.is_active, Some(false));
    assert!(user.is_suspended());
}

#[test]
fn is_active_alone_is_kept() {
    let user = user_from(base_user(serde_json::json!({ "is_active": true })));
    assert_eq!(user.is_active, Some(true));
    assert!(!user.is_suspended());
}

#[test]
fn is_activate_wins_over_is_active() {
    let user = user_from(base_user(serde_json::json!({
        "is_activate": false,
        "is_active": true
    })));
    assert_eq!(user.is_active, Some(false));
}

#[test]
fn neither_flag_means_unknown_but_not_suspended() {
    let user = user_from(base_user(serde_json::json!({})));
    assert_eq!(user.is_active, None);
    assert!(!user.is_suspended());
}

#[test]
fn serialization_emits_only_is_active() {
    let user = user_from(base_user(serde_json::json!({ "is_activate": true })));
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value.get("is_active"), Some(&serde_json::json!(true)));
    assert!(value.get("is_activate").is_none());
}

// =============================================================================
// ROLES AND PAYLOADS
// =============================================================================

#[test]
fn admin_role_check() {
    let admin = user_from(base_user(serde_json::json!({ "role": "admin" })));
    assert!(admin.is_admin());
    let ordinary = user_from(base_user(serde_json::json!({})));
    assert!(!ordinary.is_admin());
}

#[test]
fn login_response_decodes() {
    let resp: LoginResponse = serde_json::from_value(serde_json::json!({
        "access_token": "tok-abc",
        "token_type": "bearer",
        "user": base_user(serde_json::json!({ "is_activate": true }))
    }))
    .unwrap();
    assert_eq!(resp.access_token, "tok-abc");
    assert_eq!(resp.token_type, "bearer");
    assert_eq!(resp.user.is_active, Some(true));
}

#[test]
fn user_update_skips_absent_fields() {
    let update = UserUpdate { full_name: Some("Anh Tran".into()), ..UserUpdate::default() };
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value, serde_json::json!({ "full_name": "Anh Tran" }));
}

#[test]
fn register_payload_skips_absent_optionals() {
    let payload = RegisterPayload {
        email: "a@b.com".into(),
        username: "anh".into(),
        password: "secret".into(),
        full_name: None,
        role: None,
    };
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "email": "a@b.com", "username": "anh", "password": "secret" })
    );
}
