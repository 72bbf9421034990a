// The client-side send page logic, independent of any rendering toolkit.
//
// A shell wires a `SendPage` to its views: it forwards bus events and user
// gestures into the page and implements `SendPageHost` for the confirmation
// overlay and flash messages.

pub mod app_state;
pub mod config;
pub mod currency;
pub mod events;
pub mod host;
pub mod logger;
mod screens;
pub mod send_intent;
pub mod ticker;

pub use app_state::CurrencySelection;
pub use app_state::ViewState;
pub use config::PageConfig;
pub use events::Event;
pub use events::EventBus;
pub use host::SendPageHost;
pub use screens::send::Gesture;
pub use screens::send::InputError;
pub use screens::send::SendPage;
