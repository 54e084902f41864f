// crates/quicktrim-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing TrimModule
//   2. Add `pub mod mypanel;` below
//   3. Add a field for it on QuickTrimApp and show it in update()

pub mod player;
pub mod playlist;
pub mod status;

use egui::Ui;
use quicktrim_core::{Session, TrimCommand};

/// Every panel implements this trait.
/// Modules read the session and emit commands; they never mutate it directly.
pub trait TrimModule {
    /// Stable name, also used as the egui panel id.
    fn name(&self) -> &str;
    fn ui(&mut self, ui: &mut Ui, session: &Session, cmd: &mut Vec<TrimCommand>);
}
