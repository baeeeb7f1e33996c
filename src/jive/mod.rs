//! Collaboration-platform (Jive) collaborator interfaces.
//!
//! The platform's REST facade, OAuth exchange and community registry are
//! external to this addon; the store only ever reaches them through the
//! traits defined here. The one call chain the refresh path needs is:
//! resolve the owning community from a record's context URL, build an
//! authenticated session from the record's stored token pair, then fetch
//! the place's extended properties through that session.

mod api;
mod session;

pub use api::{CommunityContext, CommunityResolver, ExtProps, PlaceApi};
pub use session::JiveSession;
