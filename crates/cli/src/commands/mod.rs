pub mod generate;
pub mod inspect;
pub mod state;
pub mod verify;
