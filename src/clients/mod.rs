pub mod pool;
pub mod http;

pub use pool::ClientPool;
pub use http::HttpClient;
