//! # Generic Messages
//!
//! The request vocabulary shared by every `ResourceClient` / `ResourceActor` pair.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The single-resource variants map to CRUD plus a custom `Action`; `List` and `Clear`
/// work on the whole collection (the recent-orders view and "forget my orders").
///
/// Generic over `T: ActorEntity`, so a cart payload can't be sent to the tracker.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Clear {
        respond_to: Response<usize>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
