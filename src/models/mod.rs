mod appointment;
mod consultation;
mod enums;
mod prescription;
mod user;

pub use appointment::*;
pub use consultation::*;
pub use enums::*;
pub use prescription::*;
pub use user::*;
