//! Integration tests for the user and car repositories.

mod common;

use carrental_core::access::{InvitationStatus, Role, UserAccount};
use carrental_db::{CarRepository, InvitationRepository, UserRepository};
use carrental_shared::types::UserId;

fn new_account(email: &str) -> UserAccount {
    UserAccount {
        id: UserId::new(),
        name: "Invited Driver".to_string(),
        email: email.to_string(),
        role: Role::User,
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_user_create_and_find() {
    let db = common::connect().await;
    let repo = UserRepository::new(db.clone());

    let user = common::create_user(&db, Role::User).await;

    let by_id = repo
        .find_by_id(user.id)
        .await
        .expect("Failed to find user")
        .expect("User should exist");
    assert_eq!(by_id, user);

    let by_email = repo
        .find_by_email(&user.email.to_uppercase())
        .await
        .expect("Failed to find user")
        .expect("Lookup should ignore case");
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_role() {
    let db = common::connect().await;
    let repo = UserRepository::new(db.clone());
    let user = common::create_user(&db, Role::User).await;

    let updated = repo
        .update_role(user.id, Role::Admin)
        .await
        .expect("Failed to update role");

    assert_eq!(updated.role, Role::Admin);
    assert!(
        repo.list_all()
            .await
            .expect("Failed to list users")
            .iter()
            .any(|u| u.id == user.id && u.role == Role::Admin)
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_cars_by_owner_and_delete() {
    let db = common::connect().await;
    let repo = CarRepository::new(db.clone());
    let owner = common::create_user(&db, Role::User).await;
    let other = common::create_user(&db, Role::User).await;

    let car = common::create_car(&db, &owner).await;
    common::create_car(&db, &other).await;

    let owned = repo.list_by_owner(owner.id).await.expect("Failed to list cars");
    assert_eq!(owned, vec![car.clone()]);

    assert!(repo.delete(car.id).await.expect("Failed to delete car"));
    assert!(!repo.delete(car.id).await.expect("Second delete should succeed"));
    assert!(repo.find_by_id(car.id).await.expect("Failed to query car").is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_register_applies_pending_invitation() {
    let db = common::connect().await;
    let users = UserRepository::new(db.clone());
    let invitations = InvitationRepository::new(db.clone());
    let admin = common::create_user(&db, Role::Admin).await;
    let email = format!("invitee-{}@example.com", UserId::new());

    let invitation = invitations
        .create(&email, Role::Admin, admin.id)
        .await
        .expect("Failed to create invitation");

    let registration = users
        .register(&new_account(&email.to_uppercase()))
        .await
        .expect("Failed to register");

    assert_eq!(registration.account.role, Role::Admin);
    assert_eq!(registration.account.email, email);
    let accepted = registration.invitation.expect("Invitation should be consumed");
    assert_eq!(accepted.id, invitation.id);
    assert_eq!(accepted.status, InvitationStatus::Accepted);
    assert!(
        invitations
            .find_pending_by_email(&email)
            .await
            .expect("Failed to query invitation")
            .is_none()
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_register_without_invitation_is_user() {
    let db = common::connect().await;
    let users = UserRepository::new(db.clone());
    let email = format!("walk-in-{}@example.com", UserId::new());

    let registration = users
        .register(&new_account(&email))
        .await
        .expect("Failed to register");

    assert_eq!(registration.account.role, Role::User);
    assert!(registration.invitation.is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_failed_register_leaves_invitation_pending() {
    let db = common::connect().await;
    let users = UserRepository::new(db.clone());
    let invitations = InvitationRepository::new(db.clone());
    let admin = common::create_user(&db, Role::Admin).await;
    let email = format!("retry-{}@example.com", UserId::new());

    invitations
        .create(&email, Role::Admin, admin.id)
        .await
        .expect("Failed to create invitation");

    // Reusing an existing profile ID makes the insert fail after the
    // invitation was already marked accepted inside the transaction.
    let clash = UserAccount {
        id: admin.id,
        ..new_account(&email)
    };
    assert!(users.register(&clash).await.is_err());

    assert!(
        invitations
            .find_pending_by_email(&email)
            .await
            .expect("Failed to query invitation")
            .is_some()
    );
    assert!(
        users
            .find_by_email(&email)
            .await
            .expect("Failed to query user")
            .is_none()
    );
}
