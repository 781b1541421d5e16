pub mod draw;
pub mod events;
pub mod input;
pub mod layout;
pub mod run;
pub mod state;
pub mod views;

pub use layout::centered_rect;
pub use run::run;
pub use state::{Explorer, TuiState, ViewMode};
