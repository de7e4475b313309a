pub mod resolver;
pub mod store;
pub mod topic;

pub use resolver::DocResolver;
pub use store::DocStore;
pub use topic::{InvalidTopic, Topic};
