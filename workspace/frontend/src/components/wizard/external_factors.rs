use web_sys::HtmlInputElement;
use wizard::state::EXTERNAL_FACTORS;
use yew::prelude::*;

use super::view::StepProps;

#[function_component(ExternalFactors)]
pub fn external_factors(props: &StepProps) -> Html {
    let enabled: Vec<bool> = {
        let wizard = props.handle.read();
        EXTERNAL_FACTORS
            .iter()
            .map(|(key, _, _)| wizard.state().factor_enabled(key))
            .collect()
    };

    html! {
        <div>
            <label class="label"><span class="label-text font-semibold">{"Fatores Externos"}</span></label>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-2">
                {for EXTERNAL_FACTORS.iter().zip(enabled).map(|((key, label, _), checked)| {
                    let handle = props.handle.clone();
                    let onchange = Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        let on = input.checked();
                        handle.edit(|state| state.set_factor(key, on));
                    });
                    html! {
                        <label key={*key} class="label cursor-pointer justify-start gap-3">
                            <input type="checkbox" class="checkbox checkbox-primary checkbox-sm" {checked} {onchange} />
                            <span class="label-text">{*label}</span>
                        </label>
                    }
                })}
            </div>
        </div>
    }
}
