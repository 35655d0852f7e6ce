mod user;
pub use user::*;

mod new;
pub use new::*;

mod id;
pub use id::*;

mod gender;
pub use gender::*;

mod profile;
pub use profile::*;
