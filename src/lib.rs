pub mod config;
pub mod model;
pub mod persona;
pub mod web;

use config::Config;
use model::ModelManager;

// App state structure
pub struct AppState {
    pub config: Config,
    pub model: ModelManager,
}
