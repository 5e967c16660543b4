pub mod current_user;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use current_user::{CurrentUserError, CurrentUserUseCase};
pub use sign_in::{SignInCommand, SignInCommandError, SignInError, SignInOutput, SignInUseCase};
pub use sign_out::{SignOutError, SignOutUseCase};
pub use sign_up::{SignUpCommand, SignUpCommandError, SignUpError, SignUpOutput, SignUpUseCase};

#[cfg(test)]
pub use current_user::MockCurrentUserUseCase;
#[cfg(test)]
pub use sign_in::MockSignInUseCase;
#[cfg(test)]
pub use sign_out::MockSignOutUseCase;
#[cfg(test)]
pub use sign_up::MockSignUpUseCase;
