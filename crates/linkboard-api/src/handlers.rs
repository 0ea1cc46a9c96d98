use axum::{extract::State, http::StatusCode, Json};
use linkboard_auth::hash_password;
use linkboard_db::entities::{board, label, link, team, user};
use linkboard_db::{
    Accessors, EntityKind, NewBoard, NewLabel, NewLink, NewTeam, NewUser, Session, StoreError,
    StoreResult,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::*;
use crate::AppState;

async fn team_view(accessors: Accessors<'_>, model: team::Model) -> StoreResult<Team> {
    let member_ids = accessors.teams().member_ids(model.id).await?;
    Ok(Team::from_model(model, member_ids))
}

async fn user_view(accessors: Accessors<'_>, model: user::Model) -> StoreResult<User> {
    let favorite_boards = accessors.users().favorite_board_ids(model.id).await?;
    Ok(User::from_model(model, favorite_boards))
}

async fn label_view(accessors: Accessors<'_>, model: label::Model) -> StoreResult<Label> {
    let link_ids = accessors.labels().link_ids(model.id).await?;
    let board_ids = accessors.labels().board_ids(model.id).await?;
    Ok(Label::from_model(model, link_ids, board_ids))
}

async fn link_view(accessors: Accessors<'_>, model: link::Model) -> StoreResult<Link> {
    let labels = accessors.links().label_ids(model.id).await?;
    Ok(Link::from_model(model, labels))
}

async fn board_view(accessors: Accessors<'_>, model: board::Model) -> StoreResult<Board> {
    let labels_filters = accessors.boards().label_filter_ids(model.id).await?;
    Ok(Board::from_model(model, labels_filters))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database ping failed: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if database { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

/// Row counts per entity table
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Row counts", body = StatsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "system"
)]
pub async fn stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsResponse>> {
    debug!("Collecting store statistics");

    let session = Session::begin(&state.db).await?;

    let mut entities = Vec::with_capacity(EntityKind::ALL.len());
    for accessor in session.accessors().for_kinds(&EntityKind::ALL) {
        entities.push(EntityCount {
            entity: accessor.kind().to_string(),
            count: accessor.count().await?,
        });
    }

    Ok(Json(StatsResponse { entities }))
}

/// List all teams
#[utoipa::path(
    get,
    path = "/api/teams",
    responses(
        (status = 200, description = "List of teams", body = Vec<Team>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn list_teams(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Team>>> {
    debug!("Listing teams");

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let mut teams = Vec::new();
    for model in accessors.teams().list_all().await? {
        teams.push(team_view(accessors, model).await?);
    }

    Ok(Json(teams))
}

/// Get a team
#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(
        ("id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team details", body = Team),
        (status = 404, description = "Team not found", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Team>> {
    debug!("Getting team: {}", id);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let model = accessors
        .teams()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team", id))?;

    Ok(Json(team_view(accessors, model).await?))
}

/// Create a team
#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 409, description = "Team name already taken", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTeamRequest>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    info!("Creating team: {}", req.name);

    let session = Session::begin(&state.db).await?;

    let model = session
        .accessors()
        .teams()
        .create(NewTeam { name: req.name })
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(Team::from_model(model, Vec::new()))))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserBasicInfo),
        (status = 409, description = "Email already registered or unknown team", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserBasicInfo>)> {
    info!("Creating user: {}", req.email);

    let password_hash = hash_password(&req.password).map_err(StoreError::from)?;
    let session = Session::begin(&state.db).await?;
    let model = session
        .accessors()
        .users()
        .create(NewUser {
            name: req.name,
            email: req.email,
            password_hash,
            is_active: req.is_active,
            team_id: req.team_id,
        })
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(UserBasicInfo::from(model))))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = User),
        (status = 401, description = "Bad credentials", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<User>> {
    debug!("Login attempt: {}", req.email);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let Some(model) = accessors
        .users()
        .authenticate(&req.email, &req.password)
        .await?
    else {
        warn!("Rejected login for {}", req.email);
        return Err(ApiError::bad_credentials());
    };

    info!("User {} logged in", model.id);
    Ok(Json(user_view(accessors, model).await?))
}

/// Get a user's public fields
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserBasicInfo),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<UserBasicInfo>> {
    debug!("Getting user: {}", id);

    let session = Session::begin(&state.db).await?;

    let model = session
        .accessors()
        .users()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(UserBasicInfo::from(model)))
}

/// Set a user's main board
#[utoipa::path(
    put,
    path = "/api/users/{id}/set_main_board",
    params(
        ("id" = i32, Path, description = "User ID"),
        SetMainBoardQuery
    ),
    responses(
        (status = 200, description = "Main board updated", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Board does not exist", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn set_main_board(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<SetMainBoardQuery>,
) -> ApiResult<Json<User>> {
    info!("Setting main board of user {} to {}", id, query.board_id);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let model = accessors
        .users()
        .set_main_board(id, query.board_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;
    let user = user_view(accessors, model).await?;
    session.commit().await?;

    Ok(Json(user))
}

/// Replace a user's favorite boards
///
/// Unknown board IDs are ignored.
#[utoipa::path(
    put,
    path = "/api/users/{id}/set_favorite_boards",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = Vec<i32>,
    responses(
        (status = 200, description = "Favorite boards replaced", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn set_favorite_boards(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(board_ids): ApiJson<Vec<i32>>,
) -> ApiResult<Json<User>> {
    info!("Replacing favorite boards of user {}", id);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let boards = accessors.boards().filter_by_ids(&board_ids).await?;
    let model = accessors
        .users()
        .set_favorite_boards(id, &boards)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;
    let user = user_view(accessors, model).await?;
    session.commit().await?;

    Ok(Json(user))
}

/// List all labels
#[utoipa::path(
    get,
    path = "/api/labels",
    responses(
        (status = 200, description = "List of labels", body = Vec<Label>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "labels"
)]
pub async fn list_labels(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Label>>> {
    debug!("Listing labels");

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let mut labels = Vec::new();
    for model in accessors.labels().list_all().await? {
        labels.push(label_view(accessors, model).await?);
    }

    Ok(Json(labels))
}

/// Get a label
#[utoipa::path(
    get,
    path = "/api/labels/{id}",
    params(
        ("id" = i32, Path, description = "Label ID")
    ),
    responses(
        (status = 200, description = "Label details", body = Label),
        (status = 404, description = "Label not found", body = ErrorResponse)
    ),
    tag = "labels"
)]
pub async fn get_label(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Label>> {
    debug!("Getting label: {}", id);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let model = accessors
        .labels()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Label", id))?;

    Ok(Json(label_view(accessors, model).await?))
}

/// Create a label
#[utoipa::path(
    post,
    path = "/api/labels",
    request_body = CreateLabelRequest,
    responses(
        (status = 201, description = "Label created", body = Label),
        (status = 409, description = "Label name taken or unknown creator", body = ErrorResponse)
    ),
    tag = "labels"
)]
pub async fn create_label(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateLabelRequest>,
) -> ApiResult<(StatusCode, Json<Label>)> {
    info!("Creating label: {}", req.name);

    let session = Session::begin(&state.db).await?;

    let model = session
        .accessors()
        .labels()
        .create(NewLabel {
            name: req.name,
            created_by_user_id: req.created_by_user_id,
            created_at: req.created_at,
        })
        .await?;
    session.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(Label::from_model(model, Vec::new(), Vec::new())),
    ))
}

/// List all links
#[utoipa::path(
    get,
    path = "/api/links",
    responses(
        (status = 200, description = "List of links", body = Vec<Link>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "links"
)]
pub async fn list_links(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Link>>> {
    debug!("Listing links");

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let mut links = Vec::new();
    for model in accessors.links().list_all().await? {
        links.push(link_view(accessors, model).await?);
    }

    Ok(Json(links))
}

/// Get a link
#[utoipa::path(
    get,
    path = "/api/links/{id}",
    params(
        ("id" = i32, Path, description = "Link ID")
    ),
    responses(
        (status = 200, description = "Link details", body = Link),
        (status = 404, description = "Link not found", body = ErrorResponse)
    ),
    tag = "links"
)]
pub async fn get_link(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Link>> {
    debug!("Getting link: {}", id);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let model = accessors
        .links()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Link", id))?;

    Ok(Json(link_view(accessors, model).await?))
}

/// Create a link
#[utoipa::path(
    post,
    path = "/api/links",
    request_body = CreateLinkRequest,
    responses(
        (status = 201, description = "Link created", body = Link),
        (status = 409, description = "Unknown creator", body = ErrorResponse)
    ),
    tag = "links"
)]
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateLinkRequest>,
) -> ApiResult<(StatusCode, Json<Link>)> {
    info!("Creating link: {}", req.url);

    let session = Session::begin(&state.db).await?;

    let model = session
        .accessors()
        .links()
        .create(NewLink {
            icon_url: req.icon_url,
            url: req.url,
            created_by_user_id: req.created_by_user_id,
            created_at: req.created_at,
        })
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(Link::from_model(model, Vec::new()))))
}

/// Replace the labels attached to a link
///
/// Unknown label IDs are ignored.
#[utoipa::path(
    post,
    path = "/api/links/{id}/set_labels",
    params(
        ("id" = i32, Path, description = "Link ID")
    ),
    request_body = Vec<i32>,
    responses(
        (status = 200, description = "Labels replaced", body = Link),
        (status = 404, description = "Link not found", body = ErrorResponse)
    ),
    tag = "links"
)]
pub async fn set_link_labels(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(label_ids): ApiJson<Vec<i32>>,
) -> ApiResult<Json<Link>> {
    info!("Replacing labels of link {}", id);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let labels = accessors.labels().filter_by_ids(&label_ids).await?;
    let model = accessors
        .links()
        .set_labels(id, &labels)
        .await?
        .ok_or_else(|| ApiError::not_found("Link", id))?;
    let link = link_view(accessors, model).await?;
    session.commit().await?;

    Ok(Json(link))
}

/// List all boards
#[utoipa::path(
    get,
    path = "/api/boards",
    responses(
        (status = 200, description = "List of boards", body = Vec<Board>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "boards"
)]
pub async fn list_boards(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Board>>> {
    debug!("Listing boards");

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let mut boards = Vec::new();
    for model in accessors.boards().list_all().await? {
        boards.push(board_view(accessors, model).await?);
    }

    Ok(Json(boards))
}

/// Get a board
#[utoipa::path(
    get,
    path = "/api/boards/{id}",
    params(
        ("id" = i32, Path, description = "Board ID")
    ),
    responses(
        (status = 200, description = "Board details", body = Board),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    tag = "boards"
)]
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Board>> {
    debug!("Getting board: {}", id);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let model = accessors
        .boards()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Board", id))?;

    Ok(Json(board_view(accessors, model).await?))
}

/// Create a board
#[utoipa::path(
    post,
    path = "/api/boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 201, description = "Board created", body = Board),
        (status = 409, description = "Board name taken or unknown creator", body = ErrorResponse)
    ),
    tag = "boards"
)]
pub async fn create_board(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    info!("Creating board: {}", req.name);

    let session = Session::begin(&state.db).await?;

    let model = session
        .accessors()
        .boards()
        .create(NewBoard {
            name: req.name,
            description: req.description,
            created_by_user_id: req.created_by_user_id,
            created_at: req.created_at,
            updated_at: req.updated_at,
        })
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(Board::from_model(model, Vec::new()))))
}

/// Replace the label filters of a board
///
/// Unknown label IDs are ignored.
#[utoipa::path(
    post,
    path = "/api/boards/{id}/set_labels_filters",
    params(
        ("id" = i32, Path, description = "Board ID")
    ),
    request_body = Vec<i32>,
    responses(
        (status = 200, description = "Label filters replaced", body = Board),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    tag = "boards"
)]
pub async fn set_board_labels_filters(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(label_ids): ApiJson<Vec<i32>>,
) -> ApiResult<Json<Board>> {
    info!("Replacing label filters of board {}", id);

    let session = Session::begin(&state.db).await?;
    let accessors = session.accessors();
    let labels = accessors.labels().filter_by_ids(&label_ids).await?;
    let model = accessors
        .boards()
        .set_labels_filters(id, &labels)
        .await?
        .ok_or_else(|| ApiError::not_found("Board", id))?;
    let board = board_view(accessors, model).await?;
    session.commit().await?;

    Ok(Json(board))
}
