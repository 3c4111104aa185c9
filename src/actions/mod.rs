//! One struct per use case: build with `new`, run with `execute`.

pub mod add_movie;
pub mod get_movie;
pub mod get_user;
pub mod list_movies;
pub mod login;
pub mod logout;
pub mod recommend_movies;
pub mod refresh_token;
pub mod signup;
pub mod update_review;
pub mod update_role;

pub use add_movie::AddMovieAction;
pub use get_movie::GetMovieAction;
pub use get_user::GetUserAction;
pub use list_movies::{ListGenresAction, ListMoviesAction};
pub use login::LoginAction;
pub use logout::LogoutAction;
pub use recommend_movies::RecommendMoviesAction;
pub use refresh_token::RefreshTokenAction;
pub use signup::{Registration, SignupAction};
pub use update_review::UpdateReviewAction;
pub use update_role::UpdateRoleAction;
