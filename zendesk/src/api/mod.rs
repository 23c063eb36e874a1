//! Endpoint methods, one capability trait per resource family.
//!
//! Every trait is implemented by [`Zendesk`](crate::Zendesk) over any
//! [`Transport`](crate::rest::Transport), so code written against a trait can
//! be handed a client backed by a test transport.

pub mod article;
pub mod custom_object;
pub mod custom_status;
pub mod request;

pub use article::ArticleApi;
pub use custom_object::CustomObjectApi;
pub use custom_status::CustomStatusApi;
pub use request::RequestApi;
