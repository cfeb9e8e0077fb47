use wizard::WizardStep;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressProps {
    pub current: WizardStep,
}

#[function_component(WizardProgress)]
pub fn wizard_progress(props: &ProgressProps) -> Html {
    let current = props.current;

    html! {
        <ul class="steps w-full mb-8">
            {for WizardStep::ALL.iter().map(|step| {
                let reached = *step <= current;
                html! {
                    <li
                        key={step.number()}
                        class={classes!("step", reached.then_some("step-primary"))}
                        data-content={if *step < current { "✓".to_string() } else { step.number().to_string() }}
                    >
                        <span class={classes!("text-xs", (*step == current).then_some("font-semibold"))}>
                            {step.label()}
                        </span>
                    </li>
                }
            })}
        </ul>
    }
}
