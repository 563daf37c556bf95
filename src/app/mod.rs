pub mod bootstrap;
pub mod controller;
pub mod debounce;
pub mod effects;
pub mod reducer;
pub mod state;
pub mod store;

pub use controller::QueryController;
pub use reducer::{reduce, QueryEvent};
pub use state::QueryState;
pub use store::QueryStore;
