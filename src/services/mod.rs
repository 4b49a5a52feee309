pub mod pipeline;
pub mod providers;
pub mod recommendations;
pub mod session;
pub mod track_search;

pub use pipeline::Recommender;
pub use session::Session;
