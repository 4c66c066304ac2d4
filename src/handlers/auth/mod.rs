mod login;
mod password_reset;
mod profile;
mod resend_otp;
mod signup;
mod utils;
mod verify_email;

pub use login::{login, logout};
pub use password_reset::{forgot_password, reset_password};
pub use profile::{get_profile, update_profile};
pub use resend_otp::resend_otp;
pub use signup::signup;
pub use verify_email::verify_email;
