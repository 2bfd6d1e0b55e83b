use ticklist_model::InputRequest;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct InputPromptProps {
  pub request:   InputRequest,
  pub on_submit: Callback<String>,
  pub on_cancel: Callback<()>
}

/// Inline single-line form answering an [`InputRequest`].
#[function_component(InputPrompt)]
pub fn input_prompt(
  props: &InputPromptProps
) -> Html {
  let text = use_state(String::new);

  let on_input = {
    let text = text.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        text.set(input.value());
      }
    )
  };
  let on_submit = {
    let text = text.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        on_submit.emit((*text).clone());
      }
    )
  };
  let on_keydown = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |e: web_sys::KeyboardEvent| {
        if e.key() == "Escape" {
          on_cancel.emit(());
        }
      }
    )
  };
  let on_cancel = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_cancel.emit(())
      }
    )
  };

  html! {
      <div class="prompt-overlay">
          <form class="prompt" onsubmit={on_submit}>
              <label>{ props.request.label() }</label>
              <input
                  type="text"
                  autofocus={true}
                  value={(*text).clone()}
                  oninput={on_input}
                  onkeydown={on_keydown}
              />
              <div class="actions">
                  <button type="button" class="btn" onclick={on_cancel}>{ "Cancel" }</button>
                  <button type="submit" class="btn ok">{ "OK" }</button>
              </div>
          </form>
      </div>
  }
}
