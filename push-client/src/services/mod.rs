pub mod categories;
pub mod dispatcher;
pub mod handler;
pub mod tokens;
pub mod topics;

pub use categories::CategoryRegistry;
pub use dispatcher::{EventDispatcher, Listener, ListenerToken, MessageDeduplicator};
pub use handler::{HandlerOutcome, NotificationHandler, PassThroughHandler};
pub use tokens::TokenLifecycle;
pub use topics::TopicSet;
