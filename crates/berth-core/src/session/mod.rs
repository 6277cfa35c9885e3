pub mod model;

pub use model::{ContainerInfo, Session, SessionStatus};
