pub mod error;
pub mod handlers;
pub mod request_id;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use request_id::{RequestId, REQUEST_ID_HEADER};
pub use routes::*;
