mod components;
mod config;
mod error;
mod game;
mod model;
mod render;
mod state;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
