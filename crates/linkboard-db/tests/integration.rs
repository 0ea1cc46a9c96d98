//! Integration tests for linkboard-db
//!
//! Tests the accessor layer against a real SQLite in-memory database

use linkboard_auth::hash_password;
use linkboard_db::entities::{board, label, link, team, user};
use linkboard_db::{
    connect, migrate, seed, EntityKind, NewBoard, NewLabel, NewLink, NewTeam, NewUser, Session,
    StoreError,
};
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    migrate(&db).await.expect("Failed to run migrations");

    db
}

fn new_user(name: &str, email: &str, team_id: Option<i32>) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: hash_password("secret-password").expect("Failed to hash password"),
        is_active: true,
        team_id,
    }
}

fn new_link(n: usize, user_id: i32) -> NewLink {
    NewLink {
        icon_url: format!("https://icons.example.com/{n}.png"),
        url: format!("https://example.com/{n}"),
        created_by_user_id: user_id,
        created_at: None,
    }
}

fn new_label(name: &str, user_id: i32) -> NewLabel {
    NewLabel {
        name: name.to_string(),
        created_by_user_id: user_id,
        created_at: None,
    }
}

fn new_board(name: &str, user_id: i32) -> NewBoard {
    NewBoard {
        name: name.to_string(),
        description: format!("{name} description"),
        created_by_user_id: user_id,
        created_at: None,
        updated_at: None,
    }
}

/// Helper to commit a single user and return it
async fn create_committed_user(db: &DatabaseConnection, email: &str) -> user::Model {
    let session = Session::begin(db).await.expect("Failed to open session");
    let user = session
        .accessors()
        .users()
        .create(new_user("tester", email, None))
        .await
        .expect("Failed to create user");
    session.commit().await.expect("Failed to commit");
    user
}

#[tokio::test]
async fn test_migrations_run_successfully() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    assert!(matches!(
        db.get_database_backend(),
        sea_orm::DatabaseBackend::Sqlite
    ));
    assert!(migrate(&db).await.is_ok());
}

#[tokio::test]
async fn test_duplicate_unique_fields_are_constraint_violations() {
    let db = setup_test_db().await;
    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();

    let teams = accessors.teams();
    teams
        .create(NewTeam {
            name: "Rocket".to_string(),
        })
        .await
        .unwrap();
    let err = teams
        .create(NewTeam {
            name: "Rocket".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(_)), "got {err:?}");
    assert_eq!(teams.count().await.unwrap(), 1);

    let users = accessors.users();
    let owner = users.create(new_user("asaf", "a@x.com", None)).await.unwrap();
    let err = users
        .create(new_user("other", "a@x.com", None))
        .await
        .unwrap_err();
    assert!(err.is_constraint_violation());
    assert_eq!(users.count().await.unwrap(), 1);

    let labels = accessors.labels();
    labels.create(new_label("rust", owner.id)).await.unwrap();
    let err = labels.create(new_label("rust", owner.id)).await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(_)));
    assert_eq!(labels.count().await.unwrap(), 1);

    let boards = accessors.boards();
    boards.create(new_board("B1", owner.id)).await.unwrap();
    let err = boards.create(new_board("B1", owner.id)).await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(_)));
    assert_eq!(boards.count().await.unwrap(), 1);

    // Earlier work in the session survives the failed inserts
    session.commit().await.unwrap();
    let session = Session::begin(&db).await.unwrap();
    assert_eq!(session.accessors().teams().count().await.unwrap(), 1);
    assert_eq!(session.accessors().boards().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_with_unknown_creator_is_foreign_key_violation() {
    let db = setup_test_db().await;
    let session = Session::begin(&db).await.unwrap();

    let err = session
        .accessors()
        .links()
        .create(new_link(1, 4242))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::ForeignKeyViolation(_)), "got {err:?}");
    assert_eq!(session.accessors().links().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_then_read_your_write() {
    let db = setup_test_db().await;
    let owner = create_committed_user(&db, "owner@x.com").await;

    let session = Session::begin(&db).await.unwrap();
    let created = session
        .accessors()
        .boards()
        .create(new_board("B1", owner.id))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, "B1");
    assert_eq!(created.description, "B1 description");
    assert_eq!(created.created_by_user_id, owner.id);
    assert_eq!(created.created_at, created.updated_at);

    // Visible inside the same session before commit
    let same_session: board::Model = session
        .accessors()
        .boards()
        .get_by_id(created.id)
        .await
        .unwrap()
        .expect("Board not found in its own session");
    assert_eq!(same_session, created);
    session.commit().await.unwrap();

    // And through a fresh session afterwards
    let session = Session::begin(&db).await.unwrap();
    let fetched = session
        .accessors()
        .boards()
        .get_by_id(created.id)
        .await
        .unwrap()
        .expect("Board not found");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.description, created.description);
    assert_eq!(fetched.created_by_user_id, created.created_by_user_id);
    assert_eq!(fetched.created_at.timestamp(), created.created_at.timestamp());
}

#[tokio::test]
async fn test_get_by_id_absent_is_none() {
    let db = setup_test_db().await;
    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();

    assert!(accessors.teams().get_by_id(1).await.unwrap().is_none());
    assert!(accessors.users().get_by_id(1).await.unwrap().is_none());
    assert!(accessors.links().get_by_id(1).await.unwrap().is_none());
    assert!(accessors.labels().get_by_id(1).await.unwrap().is_none());
    assert!(accessors.boards().get_by_id(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_is_ordered_by_id() {
    let db = setup_test_db().await;
    let session = Session::begin(&db).await.unwrap();
    let teams = session.accessors().teams();

    for name in ["Zeta", "Alpha", "Mid"] {
        teams
            .create(NewTeam {
                name: name.to_string(),
            })
            .await
            .unwrap();
    }

    let all: Vec<team::Model> = teams.list_all().await.unwrap();
    let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_filter_by_ids_drops_unknown_and_duplicates() {
    let db = setup_test_db().await;
    let owner = create_committed_user(&db, "owner@x.com").await;

    let session = Session::begin(&db).await.unwrap();
    let labels = session.accessors().labels();
    let rust = labels.create(new_label("rust", owner.id)).await.unwrap();
    let go = labels.create(new_label("go", owner.id)).await.unwrap();

    let resolved = labels.filter_by_ids(&[rust.id, 999_999]).await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0], rust);

    let resolved = labels
        .filter_by_ids(&[go.id, rust.id, go.id, go.id])
        .await
        .unwrap();
    let ids: Vec<i32> = resolved.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![rust.id, go.id]);

    assert!(labels.filter_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_labels_replaces_instead_of_merging() {
    let db = setup_test_db().await;
    let owner = create_committed_user(&db, "owner@x.com").await;

    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();
    let link = accessors.links().create(new_link(1, owner.id)).await.unwrap();

    let mut created = Vec::new();
    for name in ["a", "b", "c", "d"] {
        created.push(accessors.labels().create(new_label(name, owner.id)).await.unwrap());
    }
    let t = vec![created[0].clone(), created[1].clone()];
    let s = vec![created[2].clone(), created[3].clone(), created[2].clone()];

    accessors.links().set_labels(link.id, &t).await.unwrap();
    assert_eq!(
        accessors.links().label_ids(link.id).await.unwrap(),
        vec![created[0].id, created[1].id]
    );

    for _ in 0..2 {
        let updated = accessors
            .links()
            .set_labels(link.id, &s)
            .await
            .unwrap()
            .expect("Link not found");
        assert_eq!(updated.id, link.id);
        assert_eq!(
            accessors.links().label_ids(link.id).await.unwrap(),
            vec![created[2].id, created[3].id]
        );
    }

    // T's members no longer point back at the link
    assert!(accessors.labels().link_ids(created[0].id).await.unwrap().is_empty());
    assert!(accessors.labels().link_ids(created[1].id).await.unwrap().is_empty());

    accessors.links().set_labels(link.id, &[]).await.unwrap();
    assert!(accessors.links().label_ids(link.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_labels_on_missing_link_is_none() {
    let db = setup_test_db().await;
    let owner = create_committed_user(&db, "owner@x.com").await;

    let session = Session::begin(&db).await.unwrap();
    let label = session
        .accessors()
        .labels()
        .create(new_label("orphan", owner.id))
        .await
        .unwrap();

    let result = session
        .accessors()
        .links()
        .set_labels(12345, std::slice::from_ref(&label))
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(session.accessors().labels().link_ids(label.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_main_board_on_missing_user_mutates_nothing() {
    let db = setup_test_db().await;
    let owner = create_committed_user(&db, "owner@x.com").await;

    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();
    let board = accessors.boards().create(new_board("B1", owner.id)).await.unwrap();

    let result = accessors
        .users()
        .set_main_board(owner.id + 100, board.id)
        .await
        .unwrap();
    assert!(result.is_none());

    let owner_after = accessors.users().get_by_id(owner.id).await.unwrap().unwrap();
    assert_eq!(owner_after, owner);
    assert_eq!(owner_after.main_board_id, None);
    let board_after = accessors.boards().get_by_id(board.id).await.unwrap().unwrap();
    assert_eq!(board_after, board);
    assert_eq!(accessors.users().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_set_main_board() {
    let db = setup_test_db().await;
    let owner = create_committed_user(&db, "owner@x.com").await;

    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();
    let board = accessors.boards().create(new_board("Main", owner.id)).await.unwrap();

    let updated = accessors
        .users()
        .set_main_board(owner.id, board.id)
        .await
        .unwrap()
        .expect("User not found");
    assert_eq!(updated.main_board_id, Some(board.id));

    let err = accessors
        .users()
        .set_main_board(owner.id, 9999)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ForeignKeyViolation(_)), "got {err:?}");

    // The failed update was rolled back to its savepoint
    let reread = accessors.users().get_by_id(owner.id).await.unwrap().unwrap();
    assert_eq!(reread.main_board_id, Some(board.id));
}

#[tokio::test]
async fn test_set_favorite_boards_replaces_set() {
    let db = setup_test_db().await;
    let owner = create_committed_user(&db, "owner@x.com").await;

    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();
    let b1 = accessors.boards().create(new_board("B1", owner.id)).await.unwrap();
    let b2 = accessors.boards().create(new_board("B2", owner.id)).await.unwrap();
    let b3 = accessors.boards().create(new_board("B3", owner.id)).await.unwrap();

    let resolved = accessors
        .boards()
        .filter_by_ids(&[b1.id, b2.id, 777])
        .await
        .unwrap();
    accessors
        .users()
        .set_favorite_boards(owner.id, &resolved)
        .await
        .unwrap()
        .expect("User not found");
    assert_eq!(
        accessors.users().favorite_board_ids(owner.id).await.unwrap(),
        vec![b1.id, b2.id]
    );

    accessors
        .users()
        .set_favorite_boards(owner.id, std::slice::from_ref(&b3))
        .await
        .unwrap();
    assert_eq!(
        accessors.users().favorite_board_ids(owner.id).await.unwrap(),
        vec![b3.id]
    );
    assert_eq!(
        accessors.users().favorite_boards(&owner).await.unwrap(),
        vec![b3.clone()]
    );
    assert_eq!(
        accessors.boards().favorited_by_ids(b3.id).await.unwrap(),
        vec![owner.id]
    );
    assert!(accessors.boards().favorited_by_ids(b1.id).await.unwrap().is_empty());

    let missing = accessors
        .users()
        .set_favorite_boards(owner.id + 1, &[b1])
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_set_labels_filters_replaces_and_touches_board() {
    let db = setup_test_db().await;
    let owner = create_committed_user(&db, "owner@x.com").await;

    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();
    let past = chrono::Utc::now() - chrono::Duration::days(1);
    let board = accessors
        .boards()
        .create(NewBoard {
            created_at: Some(past),
            updated_at: Some(past),
            ..new_board("Filtered", owner.id)
        })
        .await
        .unwrap();
    let l1 = accessors.labels().create(new_label("l1", owner.id)).await.unwrap();
    let l2 = accessors.labels().create(new_label("l2", owner.id)).await.unwrap();

    let updated = accessors
        .boards()
        .set_labels_filters(board.id, &[l1.clone(), l2.clone()])
        .await
        .unwrap()
        .expect("Board not found");
    assert!(updated.updated_at > past);
    assert_eq!(updated.created_at, board.created_at);
    assert_eq!(
        accessors.boards().label_filter_ids(board.id).await.unwrap(),
        vec![l1.id, l2.id]
    );

    accessors
        .boards()
        .set_labels_filters(board.id, std::slice::from_ref(&l2))
        .await
        .unwrap();
    assert_eq!(
        accessors.boards().label_filter_ids(board.id).await.unwrap(),
        vec![l2.id]
    );
    assert!(accessors.labels().board_ids(l1.id).await.unwrap().is_empty());
    assert_eq!(accessors.labels().board_ids(l2.id).await.unwrap(), vec![board.id]);

    assert!(accessors
        .boards()
        .set_labels_filters(board.id + 10, &[l1])
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_authenticate() {
    let db = setup_test_db().await;
    let user = create_committed_user(&db, "login@x.com").await;
    assert_ne!(user.password_hash, "secret-password");

    let session = Session::begin(&db).await.unwrap();
    let users = session.accessors().users();

    let found = users
        .authenticate("login@x.com", "secret-password")
        .await
        .unwrap()
        .expect("Valid credentials rejected");
    assert_eq!(found.id, user.id);

    assert!(users
        .authenticate("login@x.com", "wrong-password")
        .await
        .unwrap()
        .is_none());
    assert!(users
        .authenticate("nobody@x.com", "secret-password")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_dropped_session_rolls_back() {
    let db = setup_test_db().await;

    {
        let session = Session::begin(&db).await.unwrap();
        session
            .accessors()
            .teams()
            .create(NewTeam {
                name: "Ghost".to_string(),
            })
            .await
            .unwrap();
        // dropped without commit
    }

    let session = Session::begin(&db).await.unwrap();
    assert_eq!(session.accessors().teams().count().await.unwrap(), 0);
    session
        .accessors()
        .teams()
        .create(NewTeam {
            name: "Ghost".to_string(),
        })
        .await
        .expect("Name should be free after rollback");
    session.rollback().await.unwrap();

    let session = Session::begin(&db).await.unwrap();
    assert_eq!(session.accessors().teams().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_team_members() {
    let db = setup_test_db().await;
    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();

    let team = accessors
        .teams()
        .create(NewTeam {
            name: "Rocket".to_string(),
        })
        .await
        .unwrap();
    let a = accessors
        .users()
        .create(new_user("a", "a@x.com", Some(team.id)))
        .await
        .unwrap();
    accessors
        .users()
        .create(new_user("loner", "l@x.com", None))
        .await
        .unwrap();
    let b = accessors
        .users()
        .create(new_user("b", "b@x.com", Some(team.id)))
        .await
        .unwrap();

    assert_eq!(
        accessors.teams().member_ids(team.id).await.unwrap(),
        vec![a.id, b.id]
    );
}

#[tokio::test]
async fn test_registry_counts_by_kind() {
    let db = setup_test_db().await;
    let session = Session::begin(&db).await.unwrap();
    let seeded = seed::populate(&session).await.expect("Failed to seed");
    assert_eq!(seeded.link_ids.len(), 3);

    let accessors = session.accessors();
    let mut counts = Vec::new();
    for accessor in accessors.for_kinds(&EntityKind::ALL) {
        counts.push((accessor.kind(), accessor.count().await.unwrap()));
    }

    assert_eq!(
        counts,
        vec![
            (EntityKind::Team, 0),
            (EntityKind::User, 1),
            (EntityKind::Link, 3),
            (EntityKind::Label, 3),
            (EntityKind::Board, 1),
        ]
    );
}

#[tokio::test]
async fn test_seed_builds_demo_relationships() {
    let db = setup_test_db().await;
    let session = Session::begin(&db).await.unwrap();
    let seeded = seed::populate(&session).await.expect("Failed to seed");
    session.commit().await.unwrap();

    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();
    let labels = &seeded.label_ids;

    assert_eq!(
        accessors.links().label_ids(seeded.link_ids[0]).await.unwrap(),
        vec![labels[0], labels[2]]
    );
    assert_eq!(
        accessors.links().label_ids(seeded.link_ids[2]).await.unwrap(),
        labels.clone()
    );

    let user = accessors
        .users()
        .authenticate(seed::DEMO_EMAIL, seed::DEMO_PASSWORD)
        .await
        .unwrap()
        .expect("Demo user cannot log in");
    assert_eq!(user.id, seeded.user_id);
    assert_eq!(user.main_board_id, Some(seeded.board_id));
    assert_eq!(
        accessors.users().favorite_board_ids(user.id).await.unwrap(),
        vec![seeded.board_id]
    );
    assert_eq!(
        accessors.boards().label_filter_ids(seeded.board_id).await.unwrap(),
        vec![labels[1]]
    );
}

#[tokio::test]
async fn test_end_to_end_link_labels_scenario() {
    let db = setup_test_db().await;

    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();

    let team = accessors
        .teams()
        .create(NewTeam {
            name: "Rocket".to_string(),
        })
        .await
        .unwrap();
    let asaf = accessors
        .users()
        .create(new_user("asaf", "a@x.com", Some(team.id)))
        .await
        .unwrap();
    assert_eq!(asaf.team_id, Some(team.id));

    let mut links: Vec<link::Model> = Vec::new();
    for n in 1..=3 {
        links.push(accessors.links().create(new_link(n, asaf.id)).await.unwrap());
    }
    let mut labels: Vec<label::Model> = Vec::new();
    for name in ["label1", "label2", "label3"] {
        labels.push(accessors.labels().create(new_label(name, asaf.id)).await.unwrap());
    }

    let requested = accessors
        .labels()
        .filter_by_ids(&[labels[0].id, labels[2].id])
        .await
        .unwrap();
    accessors
        .links()
        .set_labels(links[0].id, &requested)
        .await
        .unwrap()
        .expect("Link not found");
    session.commit().await.unwrap();

    let session = Session::begin(&db).await.unwrap();
    let accessors = session.accessors();

    let link_one = accessors.links().get_by_id(links[0].id).await.unwrap().unwrap();
    let attached = accessors.links().labels(&link_one).await.unwrap();
    assert_eq!(attached, vec![labels[0].clone(), labels[2].clone()]);

    assert!(accessors
        .labels()
        .link_ids(labels[0].id)
        .await
        .unwrap()
        .contains(&links[0].id));
    assert!(accessors
        .labels()
        .link_ids(labels[2].id)
        .await
        .unwrap()
        .contains(&links[0].id));
    assert!(accessors.labels().link_ids(labels[1].id).await.unwrap().is_empty());
    assert!(accessors.links().label_ids(links[1].id).await.unwrap().is_empty());
}
