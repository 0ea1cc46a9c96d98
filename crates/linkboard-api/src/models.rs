//! API request and response models

use chrono::{DateTime, Utc};
use linkboard_db::entities::{board, label, link, team, user};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Team
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Team {
    /// Team ID
    pub id: i32,
    /// Team name (unique)
    pub name: String,
    /// IDs of the users belonging to the team
    pub member_ids: Vec<i32>,
}

impl Team {
    pub fn from_model(model: team::Model, member_ids: Vec<i32>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            member_ids,
        }
    }
}

/// Create team request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    /// Team name
    pub name: String,
}

/// Public user fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserBasicInfo {
    /// User ID
    pub id: i32,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Whether the account is active
    pub is_active: bool,
    /// Team the user belongs to
    pub team_id: Option<i32>,
}

impl From<user::Model> for UserBasicInfo {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            is_active: model.is_active,
            team_id: model.team_id,
        }
    }
}

/// User with board preferences
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// User ID
    pub id: i32,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Whether the account is active
    pub is_active: bool,
    /// Team the user belongs to
    pub team_id: Option<i32>,
    /// Board shown first for this user
    pub main_board_id: Option<i32>,
    /// IDs of the user's favorite boards
    pub favorite_boards: Vec<i32>,
}

impl User {
    pub fn from_model(model: user::Model, favorite_boards: Vec<i32>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            is_active: model.is_active,
            team_id: model.team_id,
            main_board_id: model.main_board_id,
            favorite_boards,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Create user request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Whether the account is active (defaults to true)
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Team to join
    #[serde(default)]
    pub team_id: Option<i32>,
}

/// User login request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// User email address
    pub email: String,
    /// User password
    pub password: String,
}

/// Query for setting a user's main board
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SetMainBoardQuery {
    /// Board to use as main board
    pub board_id: i32,
}

/// Label
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Label {
    pub id: i32,
    /// Label name (unique)
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by_user_id: i32,
    /// IDs of the links carrying this label
    pub link_ids: Vec<i32>,
    /// IDs of the boards filtering on this label
    pub board_ids: Vec<i32>,
}

impl Label {
    pub fn from_model(model: label::Model, link_ids: Vec<i32>, board_ids: Vec<i32>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            created_by_user_id: model.created_by_user_id,
            link_ids,
            board_ids,
        }
    }
}

/// Create label request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLabelRequest {
    pub name: String,
    pub created_by_user_id: i32,
    /// Defaults to the current time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Saved link
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub id: i32,
    /// Favicon URL
    pub icon_url: String,
    /// Bookmarked URL
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub created_by_user_id: i32,
    /// IDs of the labels attached to the link
    pub labels: Vec<i32>,
}

impl Link {
    pub fn from_model(model: link::Model, labels: Vec<i32>) -> Self {
        Self {
            id: model.id,
            icon_url: model.icon_url,
            url: model.url,
            created_at: model.created_at,
            created_by_user_id: model.created_by_user_id,
            labels,
        }
    }
}

/// Create link request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLinkRequest {
    pub icon_url: String,
    pub url: String,
    pub created_by_user_id: i32,
    /// Defaults to the current time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Board
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Board {
    pub id: i32,
    /// Board name (unique)
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by_user_id: i32,
    /// IDs of the labels the board filters on
    pub labels_filters: Vec<i32>,
}

impl Board {
    pub fn from_model(model: board::Model, labels_filters: Vec<i32>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by_user_id: model.created_by_user_id,
            labels_filters,
        }
    }
}

/// Create board request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBoardRequest {
    pub name: String,
    pub description: String,
    pub created_by_user_id: i32,
    /// Defaults to the current time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Defaults to `created_at`
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row count for one entity table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntityCount {
    /// Table name
    pub entity: String,
    pub count: u64,
}

/// Store statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub entities: Vec<EntityCount>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Whether the database answered a ping
    pub database: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
