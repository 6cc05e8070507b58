pub mod auth;

pub mod users;

pub mod directory;

pub mod records;

pub mod competitions;

pub use auth::configure_auth_routes;
pub use competitions::configure_competition_routes;
pub use directory::configure_directory_routes;
pub use records::configure_record_routes;
pub use users::configure_user_routes;
