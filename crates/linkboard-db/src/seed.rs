//! Demo dataset
//!
//! One user owning three links, three labels and a board, with labels
//! attached, the board marked favorite and main, and one board filter.

use linkboard_auth::hash_password;
use tracing::info;

use crate::accessor::{NewBoard, NewLabel, NewLink, NewUser};
use crate::error::StoreResult;
use crate::session::Session;

pub const DEMO_EMAIL: &str = "user@email.com";
pub const DEMO_PASSWORD: &str = "12345678";

/// Ids of the rows created by [`populate`].
#[derive(Debug, Clone)]
pub struct Seeded {
    pub user_id: i32,
    pub link_ids: Vec<i32>,
    pub label_ids: Vec<i32>,
    pub board_id: i32,
}

/// Populate the demo dataset inside `session`; the caller commits.
pub async fn populate(session: &Session) -> StoreResult<Seeded> {
    let accessors = session.accessors();

    let password_hash = hash_password(DEMO_PASSWORD)?;

    let user = accessors
        .users()
        .create(NewUser {
            name: "demo".to_string(),
            email: DEMO_EMAIL.to_string(),
            password_hash,
            is_active: true,
            team_id: None,
        })
        .await?;

    let mut links = Vec::new();
    for n in 1..=3 {
        let link = accessors
            .links()
            .create(NewLink {
                icon_url: format!("https://icon{n}.example.com/favicon.ico"),
                url: format!("https://url{n}.example.com"),
                created_by_user_id: user.id,
                created_at: None,
            })
            .await?;
        links.push(link);
    }

    let mut labels = Vec::new();
    for n in 1..=3 {
        let label = accessors
            .labels()
            .create(NewLabel {
                name: format!("label{n}"),
                created_by_user_id: user.id,
                created_at: None,
            })
            .await?;
        labels.push(label);
    }

    let link_labels = [
        vec![labels[0].clone(), labels[2].clone()],
        vec![labels[0].clone(), labels[1].clone()],
        labels.clone(),
    ];
    for (link, attached) in links.iter().zip(link_labels.iter()) {
        accessors.links().set_labels(link.id, attached).await?;
    }

    let board = accessors
        .boards()
        .create(NewBoard {
            name: "board1".to_string(),
            description: "my cool board".to_string(),
            created_by_user_id: user.id,
            created_at: None,
            updated_at: None,
        })
        .await?;

    accessors
        .users()
        .set_favorite_boards(user.id, std::slice::from_ref(&board))
        .await?;
    accessors.users().set_main_board(user.id, board.id).await?;
    accessors
        .boards()
        .set_labels_filters(board.id, std::slice::from_ref(&labels[1]))
        .await?;

    info!(
        "Seeded demo data: user {}, {} links, {} labels, board {}",
        user.id,
        links.len(),
        labels.len(),
        board.id
    );

    Ok(Seeded {
        user_id: user.id,
        link_ids: links.iter().map(|l| l.id).collect(),
        label_ids: labels.iter().map(|l| l.id).collect(),
        board_id: board.id,
    })
}
