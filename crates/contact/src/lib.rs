mod controller;
mod delivery;
mod form;
mod notify;

pub use controller::*;
pub use delivery::*;
pub use form::*;
pub use notify::*;
