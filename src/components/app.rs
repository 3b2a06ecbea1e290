use super::stage::Stage;
use crate::config::GameConfig;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Settings are read once; the stage keeps its own copy for the game's lifetime.
    let config = use_state(GameConfig::load);

    html! { <Stage config={(*config).clone()} /> }
}
