//! Database entities

pub mod board;
pub mod board_label_filter;
pub mod label;
pub mod link;
pub mod link_label;
pub mod team;
pub mod user;
pub mod user_favorite_board;

pub use board::Entity as Board;
pub use board_label_filter::Entity as BoardLabelFilter;
pub use label::Entity as Label;
pub use link::Entity as Link;
pub use link_label::Entity as LinkLabel;
pub use team::Entity as Team;
pub use user::Entity as User;
pub use user_favorite_board::Entity as UserFavoriteBoard;

pub mod prelude {
    pub use super::board::Entity as Board;
    pub use super::board_label_filter::Entity as BoardLabelFilter;
    pub use super::label::Entity as Label;
    pub use super::link::Entity as Link;
    pub use super::link_label::Entity as LinkLabel;
    pub use super::team::Entity as Team;
    pub use super::user::Entity as User;
    pub use super::user_favorite_board::Entity as UserFavoriteBoard;
}
