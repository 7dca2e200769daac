pub mod auth;
pub mod broadcast_coordinator;
pub mod propagator;
pub mod registry;
pub mod resolver;

pub use auth::{AuthContext, BearerValidator, JwtCodec, Role};
pub use broadcast_coordinator::BroadcastCoordinator;
pub use propagator::AssignmentPropagator;
pub use registry::SessionRegistry;
