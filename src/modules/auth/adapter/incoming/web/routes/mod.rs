pub mod current_user;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use current_user::current_user_handler;
pub use sign_in::{sign_in_handler, SignInRequest};
pub use sign_out::sign_out_handler;
pub use sign_up::{sign_up_handler, SignUpRequest};
