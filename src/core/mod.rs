//! Engine-independent game core: states, contacts, timers and the session
//! that ties them together.

pub mod constants;
pub mod contact;
pub mod device;
pub mod event;
pub mod geometry;
pub mod session;
pub mod state;
pub mod timer;

pub use contact::{resolve_contact, CategoryMask, ContactCategory, ContactOutcome};
pub use device::DeviceClass;
pub use event::{Cue, Effect, Event};
pub use geometry::{Bounds, Point, Viewport};
pub use session::GameSession;
pub use state::GameState;
pub use timer::{Scheduler, TimerHandle, TimerWheel};
