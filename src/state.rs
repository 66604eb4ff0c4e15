use std::sync::Arc;

use crate::config::UnknownEmailMode;
use crate::reset::ResetService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub resets: ResetService,
    pub unknown_email: UnknownEmailMode,
}
