use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FpsOverlayProps {
    pub fps: Option<u32>,
    pub paused: bool,
}

#[function_component]
pub fn FpsOverlay(props: &FpsOverlayProps) -> Html {
    let value_style = "min-width:40px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let fps = match props.fps {
        Some(v) => v.to_string(),
        None => "--".to_string(),
    };
    html! {
        <div style="position:absolute; top:0px; left:0px; background:rgba(22,27,34,0.9); border:1px solid #30363d; padding:4px 8px; display:flex; gap:8px; font-size:12px; font-family:monospace; color:#0ff;">
            <span style={value_style}>{ fps }</span>
            <span>{"FPS"}</span>
            {
                if props.paused {
                    html! { <span style="color:#f0883e;">{"paused"}</span> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
