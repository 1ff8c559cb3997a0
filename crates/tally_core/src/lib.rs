//! Token tally core: pure session state machine, model registry and view-model helpers.
mod drop_payload;
mod effect;
mod msg;
mod registry;
mod state;
mod update;
mod view_model;

pub use drop_payload::{parse_drop_payload, DroppedFile};
pub use effect::Effect;
pub use msg::Msg;
pub use registry::{CountingScheme, ModelOption, ModelRegistry, RegistryError};
pub use state::{AppState, RequestId, SessionError, Stage, TokenTally};
pub use update::update;
pub use view_model::{AppViewModel, CountDisplay, ModelRowView};
