use wizard::WizardStep;
use yew::prelude::*;

use super::progress::WizardProgress;
use super::step_basic::StepBasic;
use super::step_data_selection::StepDataSelection;
use super::step_result::StepResult;
use super::step_review::StepReview;
use super::store::{use_forecast_wizard, WizardHandle};

#[derive(Properties, PartialEq)]
pub struct StepProps {
    pub handle: WizardHandle,
}

#[function_component(ForecastWizardView)]
pub fn forecast_wizard_view() -> Html {
    let handle = use_forecast_wizard();
    let current = handle.read().current_step();
    log::trace!("Rendering wizard step {}", current);

    let body = match current {
        WizardStep::Basic => html! { <StepBasic handle={handle.clone()} /> },
        WizardStep::DataSelection => html! { <StepDataSelection handle={handle.clone()} /> },
        WizardStep::Review => html! { <StepReview handle={handle.clone()} /> },
        WizardStep::Result => html! { <StepResult handle={handle.clone()} /> },
    };

    html! {
        <div class="max-w-5xl mx-auto">
            <WizardProgress current={current} />
            {body}
            {if matches!(current, WizardStep::Basic | WizardStep::DataSelection) {
                html! { <StepNavigation handle={handle.clone()} /> }
            } else {
                html! {}
            }}
        </div>
    }
}

/// Back / next buttons of the form steps.
#[function_component(StepNavigation)]
pub fn step_navigation(props: &StepProps) -> Html {
    let (can_retreat, can_advance) = {
        let wizard = props.handle.read();
        (wizard.can_retreat(), wizard.can_advance())
    };

    let on_back = {
        let handle = props.handle.clone();
        Callback::from(move |_| {
            handle.update(|wizard| wizard.retreat());
        })
    };

    let on_next = {
        let handle = props.handle.clone();
        Callback::from(move |_| {
            if !handle.update(|wizard| wizard.advance()) {
                log::debug!("Current step is not complete yet");
            }
        })
    };

    html! {
        <div class="flex justify-between mt-6">
            <button class="btn btn-ghost" disabled={!can_retreat} onclick={on_back}>
                <i class="fas fa-arrow-left"></i>
                {" Voltar"}
            </button>
            <button class="btn btn-primary" disabled={!can_advance} onclick={on_next}>
                {"Próximo "}
                <i class="fas fa-arrow-right"></i>
            </button>
        </div>
    }
}
