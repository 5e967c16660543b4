pub mod current_user;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use current_user::CurrentUserService;
pub use sign_in::SignInService;
pub use sign_out::SignOutService;
pub use sign_up::SignUpService;
