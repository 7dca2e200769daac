pub mod jwt;
pub mod validator;

pub use jwt::{Claims, JwtCodec, Role};
pub use validator::{AuthContext, BearerValidator};
