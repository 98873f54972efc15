mod index;
mod upload;
mod ws;

pub use index::index;
pub use upload::upload;
pub use ws::subscribe;
