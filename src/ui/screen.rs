use ratatui::Frame;

use crate::{App, AppState};

/// A UI Screen boundary: responsible for rendering the current app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Setup screen - settings form
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        super::render_setup(app, f.area(), f.buffer_mut());
    }
}

/// Training screen - canvas plus the optimal movement panel
pub struct TrainingScreen;

impl Screen for TrainingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        super::render_training(app, f.area(), f.buffer_mut());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Setup => Box::new(SetupScreen),
        AppState::Training => Box::new(TrainingScreen),
    }
}
