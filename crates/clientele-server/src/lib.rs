//! Clientele Server: REST endpoints for customer records.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/api/customer` | every customer |
//! | POST | `/api/customer` | create a customer |
//! | GET | `/api/customer/:id` | one customer |
//! | PUT | `/api/customer/:id` | partial or full update |
//! | DELETE | `/api/customer/:id` | delete a customer |

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ConfigError};
pub use http::{API_PREFIX, build_router};
pub use logging::init_logging;
pub use state::AppState;
