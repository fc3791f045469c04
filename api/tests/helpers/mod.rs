pub mod app;

pub use app::{bearer, create_user, json_body, make_test_app, send};
