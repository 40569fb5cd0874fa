use crate::UserRole;

use std::str::FromStr;

#[test]
fn test_user_role_round_trips_through_str() {
    for role in [UserRole::Admin, UserRole::Member] {
        assert_eq!(UserRole::from_str(role.as_str()).unwrap(), role);
    }
}

#[test]
fn test_user_role_rejects_unknown() {
    assert!(UserRole::from_str("owner").is_err());
    assert!(UserRole::from_str("Admin").is_err());
}

#[test]
fn test_user_role_default_is_member() {
    assert_eq!(UserRole::default(), UserRole::Member);
    assert!(!UserRole::default().is_admin());
    assert!(UserRole::Admin.is_admin());
}
