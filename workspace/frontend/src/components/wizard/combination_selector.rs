use wizard::catalog::{self, AbcClass, LINES, PROCESSES};
use yew::prelude::*;

use super::view::StepProps;

#[derive(Properties, PartialEq)]
struct OptionCardProps {
    label: AttrValue,
    #[prop_or_default]
    description: Option<AttrValue>,
    checked: bool,
    disabled: bool,
    on_toggle: Callback<()>,
}

#[function_component(OptionCard)]
fn option_card(props: &OptionCardProps) -> Html {
    let onchange = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: Event| on_toggle.emit(()))
    };

    html! {
        <label class={classes!(
            "label", "cursor-pointer", "justify-start", "gap-3", "rounded-lg", "border", "p-3",
            if props.checked { "border-primary" } else { "border-base-300" },
            props.disabled.then_some("opacity-40"),
        )}>
            <input
                type="checkbox"
                class="checkbox checkbox-primary checkbox-sm"
                checked={props.checked}
                disabled={props.disabled}
                {onchange}
            />
            <div class="flex flex-col">
                <span class="label-text font-medium">{props.label.clone()}</span>
                {if let Some(description) = &props.description {
                    html! { <span class="text-xs text-gray-500">{description.clone()}</span> }
                } else {
                    html! {}
                }}
            </div>
        </label>
    }
}

/// Lines, processes and ABC classes. Options that cannot be combined with the
/// current selection are disabled.
#[function_component(CombinationSelector)]
pub fn combination_selector(props: &StepProps) -> Html {
    let (lines, processes, classes) = {
        let wizard = props.handle.read();
        let state = wizard.state();
        (
            state.selected_lines().clone(),
            state.selected_processes().clone(),
            state.selected_classes().clone(),
        )
    };

    let enabled_lines: Vec<&str> = catalog::enabled_lines(&processes).iter().map(|l| l.id).collect();
    let enabled_processes: Vec<&str> = catalog::enabled_processes(&lines).iter().map(|p| p.id).collect();

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            <div class="flex flex-col gap-2">
                <h3 class="font-semibold">{"Linhas"}</h3>
                {for LINES.iter().map(|line| {
                    let handle = props.handle.clone();
                    let id = line.id;
                    let checked = lines.contains(id);
                    html! {
                        <OptionCard
                            key={id}
                            label={line.label}
                            description={Some(AttrValue::from(line.description))}
                            {checked}
                            disabled={!checked && !enabled_lines.contains(&id)}
                            on_toggle={Callback::from(move |_| handle.try_edit(|state| state.toggle_line(id)))}
                        />
                    }
                })}
            </div>

            <div class="flex flex-col gap-2">
                <h3 class="font-semibold">{"Processos"}</h3>
                {for PROCESSES.iter().map(|process| {
                    let handle = props.handle.clone();
                    let id = process.id;
                    let checked = processes.contains(id);
                    html! {
                        <OptionCard
                            key={id}
                            label={process.label}
                            {checked}
                            disabled={!checked && !enabled_processes.contains(&id)}
                            on_toggle={Callback::from(move |_| handle.try_edit(|state| state.toggle_process(id)))}
                        />
                    }
                })}
            </div>

            <div class="flex flex-col gap-2">
                <h3 class="font-semibold">{"Classificação ABC"}</h3>
                {for AbcClass::ALL.iter().map(|class| {
                    let class = *class;
                    let handle = props.handle.clone();
                    html! {
                        <OptionCard
                            key={class.as_str()}
                            label={class.label()}
                            description={Some(AttrValue::from(class.description()))}
                            checked={classes.contains(&class)}
                            disabled={false}
                            on_toggle={Callback::from(move |_| handle.edit(|state| state.toggle_class(class)))}
                        />
                    }
                })}
            </div>
        </div>
    }
}
