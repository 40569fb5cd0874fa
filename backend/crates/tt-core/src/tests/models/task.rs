use crate::{NewTask, Task, TaskStatus, User, UserRole};

#[test]
fn test_new_task_defaults() {
    let task = NewTask::new("Write docs".to_string(), 7, 3);

    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.description, None);
    assert_eq!(task.assigned_user_id, None);
    assert_eq!(task.user_id, 7);
    assert_eq!(task.tenant_id, 3);
}

#[test]
fn test_task_is_assigned_to() {
    let task = Task {
        id: 1,
        title: "t".into(),
        description: None,
        status: TaskStatus::Todo,
        completed: false,
        user_id: Some(1),
        assigned_user_id: Some(2),
        tenant_id: 1,
    };

    assert!(task.is_assigned_to(2));
    assert!(!task.is_assigned_to(1));
}

#[test]
fn test_user_serialization_omits_password_hash() {
    let user = User {
        id: 1,
        email: "a@example.com".into(),
        password_hash: "$argon2id$secret".into(),
        tenant_id: 4,
        role: UserRole::Admin,
    };

    let json = serde_json::to_value(&user).unwrap();

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "admin");
    assert_eq!(json["tenant_id"], 4);
}
