mod actor;
mod handle;

pub use actor::rest_url;
pub use handle::FirebaseStore;
