use ticklist_model::view::TagPill;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TagPillProps {
  pub pill: TagPill
}

#[function_component(TagPillView)]
pub fn tag_pill(
  props: &TagPillProps
) -> Html {
  let style = format!(
    "background:{};color:#333;",
    props.pill.color
  );
  html! {
      <span class="tag-pill" style={style}>{ &props.pill.text }</span>
  }
}
