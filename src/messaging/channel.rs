//! Request/response channel to the background context

use async_trait::async_trait;

use super::{Request, Response};
use crate::error::Result;

/// One request, one answer. Implementations fail with
/// `EasyWordError::ChannelDelivery` when nothing answered.
///
/// Futures are not `Send`: everything runs on the page's event loop.
#[async_trait(?Send)]
pub trait Channel {
    async fn send(&self, request: Request) -> Result<Response>;
}

#[async_trait(?Send)]
impl<C: Channel + ?Sized> Channel for &C {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }
}

#[async_trait(?Send)]
impl<C: Channel + ?Sized> Channel for std::rc::Rc<C> {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }
}
